//! Price source error types.

/// Errors that can occur while fetching quotes.
#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("quote service returned {status}: {body}")]
    Http { status: u16, body: String },

    #[error("failed to parse quotes: {0}")]
    Parse(String),
}
