//! Market-data adapters
//!
//! This module provides the `MarketDataSource` abstraction consumed by the
//! support search and its REST implementations per exchange.

pub mod binance;
pub mod errors;
pub mod factory;
pub mod kraken;
pub mod shared;
#[cfg(test)]
pub mod test_utils;
pub mod traits;
pub mod types;

// Re-export commonly used types for convenience
pub use binance::{BinanceAdapter, BinanceConfig};
pub use errors::{ExchangeError, ExchangeResult};
pub use factory::{create_market_data, AnyMarketData};
pub use kraken::{KrakenAdapter, KrakenConfig};
pub use traits::MarketDataSource;
pub use types::{bucket_levels, BookLevel, BucketedBook, RawSnapshot};
