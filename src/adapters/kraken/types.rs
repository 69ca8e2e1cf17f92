//! Kraken Types
//!
//! REST response types for Kraken public endpoints.
//!
//! Docs: https://docs.kraken.com/api/docs/rest-api/get-ticker-information
//!
//! Every response is wrapped as `{ "error": [...], "result": { "<PAIR>": ... } }`
//! where `<PAIR>` is Kraken's canonical pair name (e.g. "XXBTZUSD" for "XBTUSD").
//! Ticker fields used:
//!   c = [last trade price, lot volume]
//!   p = [vwap today, vwap last 24 hours]
//! Depth levels are `[price, volume, timestamp]`.

use std::collections::HashMap;

use serde::Deserialize;

use crate::adapters::errors::{ExchangeError, ExchangeResult};
use crate::adapters::types::{parse_string_level, BookLevel};

/// Envelope shared by all Kraken public responses
#[derive(Debug, Clone, Deserialize)]
pub struct KrakenResponse<T> {
    #[serde(default)]
    pub error: Vec<String>,
    pub result: Option<HashMap<String, T>>,
}

impl<T> KrakenResponse<T> {
    /// Unwrap the single pair entry, mapping Kraken error strings
    pub fn into_pair(self, market: &str) -> ExchangeResult<T> {
        if let Some(first) = self.error.first() {
            if first.contains("Unknown asset pair") {
                return Err(ExchangeError::UnknownMarket(market.to_string()));
            }
            return Err(ExchangeError::InvalidResponse(self.error.join("; ")));
        }
        self.result
            .and_then(|pairs| pairs.into_values().next())
            .ok_or_else(|| {
                ExchangeError::InvalidResponse(format!("kraken returned no result for {}", market))
            })
    }
}

/// Ticker entry (only the fields we read)
#[derive(Debug, Clone, Deserialize)]
pub struct TickerInfo {
    /// Last trade closed: [price, lot volume]
    pub c: Vec<String>,
    /// Volume weighted average price: [today, last 24 hours]
    pub p: Vec<String>,
}

impl TickerInfo {
    pub fn last_price(&self) -> Option<&str> {
        self.c.first().map(String::as_str)
    }

    pub fn vwap_24h(&self) -> Option<&str> {
        self.p.get(1).map(String::as_str)
    }
}

/// Depth entry (bid side only)
#[derive(Debug, Clone, Deserialize)]
pub struct DepthInfo {
    pub bids: Vec<Vec<serde_json::Value>>,
}

impl DepthInfo {
    pub fn bid_levels(&self) -> ExchangeResult<Vec<BookLevel>> {
        self.bids.iter().map(|lvl| parse_string_level(lvl)).collect()
    }
}
