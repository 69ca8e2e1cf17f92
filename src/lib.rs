//! Support Finder
//!
//! Finds the bucket granularity at which a market's bid book shows enough
//! distinct support levels:
//! - Market-data adapters (Binance, Kraken)
//! - Granularity search over a filtered, bucketed bid book
//! - Dip/pip tolerance relaxation

pub mod adapters;
pub mod config;
pub mod core;
pub mod error;

pub use error::AppError;
