//! Exchange adapter error types
//!
//! All market-data collaborator failures are wrapped in `ExchangeError`
//! so the search can tell them apart from a thin order book.

use thiserror::Error;

/// Exchange-specific error types for market-data operations
#[derive(Error, Debug)]
pub enum ExchangeError {
    /// Transport-level failure reaching the exchange
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Exchange answered with a non-success HTTP status
    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// Invalid or unexpected response from exchange
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Exchange does not list the requested market
    #[error("Unknown market: {0}")]
    UnknownMarket(String),

    /// Request rejected before reaching the exchange
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<reqwest::Error> for ExchangeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ExchangeError::InvalidResponse(err.to_string())
        } else {
            ExchangeError::ConnectionFailed(err.to_string())
        }
    }
}

/// Result type alias for exchange operations
pub type ExchangeResult<T> = std::result::Result<T, ExchangeError>;
