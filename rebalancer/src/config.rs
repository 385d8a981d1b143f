//! TOML configuration loading and validation.
//!
//! Every section is optional; a missing file section falls back to defaults
//! that reproduce the classic layout (`ranking.json` and dated snapshots in
//! the working directory, quotes from brapi.dev).

use std::path::{Path, PathBuf};
use std::time::Duration;

use equiweight::MissingPricePolicy;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub quotes: QuotesConfig,
    #[serde(default)]
    pub portfolio: PortfolioConfig,
    #[serde(default)]
    pub policy: PolicyConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuotesConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for QuotesConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "https://brapi.dev/api".into()
}
fn default_timeout() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize)]
pub struct PortfolioConfig {
    /// Directory holding the dated snapshot files.
    #[serde(default = "default_portfolio_dir")]
    pub dir: String,
    #[serde(default = "default_ranking_file")]
    pub ranking_file: String,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            dir: default_portfolio_dir(),
            ranking_file: default_ranking_file(),
        }
    }
}

fn default_portfolio_dir() -> String {
    ".".into()
}
fn default_ranking_file() -> String {
    "ranking.json".into()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingPrice {
    Fail,
    Skip,
}

impl From<MissingPrice> for MissingPricePolicy {
    fn from(value: MissingPrice) -> Self {
        match value {
            MissingPrice::Fail => MissingPricePolicy::Fail,
            MissingPrice::Skip => MissingPricePolicy::Skip,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PolicyConfig {
    #[serde(default = "default_missing_price")]
    pub missing_price: MissingPrice,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            missing_price: default_missing_price(),
        }
    }
}

fn default_missing_price() -> MissingPrice {
    MissingPrice::Fail
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_dir")]
    pub dir: String,
    #[serde(default = "default_audit_file")]
    pub audit_file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: default_log_dir(),
            audit_file: default_audit_file(),
        }
    }
}

fn default_log_dir() -> String {
    "./logs".into()
}
fn default_audit_file() -> String {
    "audit.jsonl".into()
}

impl Config {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&contents)
    }

    /// Parse from a TOML string (useful for testing).
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate config invariants.
    fn validate(&self) -> Result<()> {
        if self.quotes.base_url.trim().is_empty() {
            return Err(Error::Config("quotes.base_url must not be empty".into()));
        }
        if self.quotes.timeout_secs == 0 {
            return Err(Error::Config("quotes.timeout_secs must be > 0".into()));
        }
        if self.portfolio.ranking_file.trim().is_empty() {
            return Err(Error::Config(
                "portfolio.ranking_file must not be empty".into(),
            ));
        }
        if self.logging.audit_file.trim().is_empty() {
            return Err(Error::Config("logging.audit_file must not be empty".into()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.quotes.timeout_secs)
    }

    /// Full path to the ranking file.
    ///
    /// Relative paths resolve against the snapshot directory.
    pub fn ranking_path(&self) -> PathBuf {
        Path::new(&self.portfolio.dir).join(&self.portfolio.ranking_file)
    }

    /// Full path to a snapshot file inside the snapshot directory.
    pub fn snapshot_path(&self, file_name: &str) -> PathBuf {
        Path::new(&self.portfolio.dir).join(file_name)
    }

    /// Full path to the audit log file.
    pub fn audit_path(&self) -> PathBuf {
        Path::new(&self.logging.dir).join(&self.logging.audit_file)
    }
}
