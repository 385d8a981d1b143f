//! Error types for the rebalancer.

use std::path::PathBuf;

/// All errors that can occur during a rebalancer run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("invalid amount: {0}")]
    Cash(#[from] equiweight::ParseCashError),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to encode snapshot: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("price source error: {0}")]
    Quotes(#[from] equiweight_quotes::QuoteError),

    #[error("distribution failed: {0}")]
    Distribute(#[from] equiweight::DistributeError),

    #[error("confirmation prompt failed: {0}")]
    Prompt(#[source] dialoguer::Error),

    #[error("aborted: {0}")]
    Aborted(String),

    #[error("audit log error: {0}")]
    Audit(#[from] std::io::Error),
}

impl Error {
    /// Process exit code for this error: 0 when the user chose to stop, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Aborted(_) => 0,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
