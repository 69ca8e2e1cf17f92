//! Binance exchange adapter module
//!
//! Provides REST-based public spot market data from Binance.

pub mod adapter;
pub mod config;
pub mod types;

pub use adapter::BinanceAdapter;
pub use config::BinanceConfig;
