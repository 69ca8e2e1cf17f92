//! Kraken exchange adapter module
//!
//! Provides REST-based public market data from Kraken.

pub mod adapter;
pub mod config;
pub mod types;

pub use adapter::KrakenAdapter;
pub use config::KrakenConfig;
