//! Search error types

use thiserror::Error;

use crate::adapters::errors::ExchangeError;

/// Failure of a support search
#[derive(Error, Debug)]
pub enum SearchError {
    /// Market-data collaborator failed; aborts the search without relaxation
    #[error("Exchange error: {0}")]
    Exchange(#[from] ExchangeError),

    /// No granularity produced enough support levels
    #[error("Thin book on {market}: fewer than {required} support levels (dip={dip}, pip={pip})")]
    ThinBook {
        market: String,
        required: usize,
        dip: f64,
        pip: f64,
    },
}

impl SearchError {
    pub fn thin_book(market: impl Into<String>, required: usize, dip: f64, pip: f64) -> Self {
        Self::ThinBook {
            market: market.into(),
            required,
            dip,
            pip,
        }
    }

    pub fn is_thin_book(&self) -> bool {
        matches!(self, Self::ThinBook { .. })
    }
}
