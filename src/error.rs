//! Application-wide error types using thiserror
//!
//! Errors surfacing in the binary are wrapped in AppError.

use thiserror::Error;

use crate::adapters::errors::ExchangeError;
use crate::core::errors::SearchError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Exchange error: {0}")]
    Exchange(#[from] ExchangeError),

    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// True when the market simply lacks support depth
    pub fn is_thin_book(&self) -> bool {
        matches!(self, AppError::Search(e) if e.is_thin_book())
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = AppError::Config("bad pip".into());
        assert_eq!(err.to_string(), "Configuration error: bad pip");
    }

    #[test]
    fn test_search_error_wraps() {
        let err: AppError = SearchError::thin_book("ETHUSDT", 2, 5.0, 30.0).into();
        assert!(err.is_thin_book());
        assert!(err.to_string().starts_with("Search error: Thin book on ETHUSDT"));
    }

    #[test]
    fn test_exchange_error_is_not_thin_book() {
        let err: AppError = ExchangeError::UnknownMarket("FOO".into()).into();
        assert!(!err.is_thin_book());
        assert_eq!(err.to_string(), "Exchange error: Unknown market: FOO");

        let wrapped: AppError = SearchError::from(ExchangeError::UnknownMarket("FOO".into())).into();
        assert!(!wrapped.is_thin_book());
    }
}
