//! Core data types for market-data adapters
//!
//! These types are shared by every adapter and by the support search.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::adapters::errors::{ExchangeError, ExchangeResult};
use crate::config::constants;
use crate::core::quantize::round_to_multiple;

// =============================================================================
// Shared HTTP Client Builder
// =============================================================================

/// Max idle connections per host in connection pool
const HTTP_POOL_MAX_IDLE: usize = 2;
/// TCP keepalive interval (seconds)
const HTTP_TCP_KEEPALIVE_SECS: u64 = 30;

/// Create the HTTP client used by a REST market-data adapter
///
/// Request and connect timeouts bound how long a single collaborator
/// call can block the search.
pub fn create_http_client(exchange_name: &str) -> reqwest::Client {
    let timeout = constants::http_timeout();
    let connect_timeout = constants::http_connect_timeout();
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(connect_timeout)
        .pool_max_idle_per_host(HTTP_POOL_MAX_IDLE)
        .tcp_keepalive(Duration::from_secs(HTTP_TCP_KEEPALIVE_SECS))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new());
    tracing::debug!(
        phase = "init",
        exchange = %exchange_name,
        timeout_ms = timeout.as_millis() as u64,
        connect_timeout_ms = connect_timeout.as_millis() as u64,
        "HTTP client configured"
    );
    client
}

// =============================================================================
// Order Book Types
// =============================================================================

/// A single bid level (price + aggregated size)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BookLevel {
    /// Price at this level
    pub price: f64,
    /// Size resting at this price
    pub size: f64,
}

impl BookLevel {
    pub fn new(price: f64, size: f64) -> Self {
        Self { price, size }
    }
}

/// Bid-side order book as fetched from the exchange
///
/// Fetched once per search and never refreshed while the search runs;
/// every granularity is derived from the same levels.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawSnapshot {
    /// Exchange symbol the levels belong to
    pub market: String,
    /// Bid levels sorted descending by price (best bid first)
    bids: Vec<BookLevel>,
    /// Fetch time in Unix milliseconds
    pub timestamp: u64,
}

impl RawSnapshot {
    /// Build a snapshot, sorting bids descending by price
    pub fn new(market: impl Into<String>, mut bids: Vec<BookLevel>, timestamp: u64) -> Self {
        bids.sort_by(|a, b| b.price.total_cmp(&a.price));
        Self {
            market: market.into(),
            bids,
            timestamp,
        }
    }

    pub fn bids(&self) -> &[BookLevel] {
        &self.bids
    }

    pub fn len(&self) -> usize {
        self.bids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty()
    }

    pub fn best_bid(&self) -> Option<f64> {
        self.bids.first().map(|l| l.price)
    }
}

/// Bid levels merged onto a granularity grid, descending by price
pub type BucketedBook = Vec<BookLevel>;

/// Merge snapshot bids into buckets of width `granularity`
///
/// Each price is quantized with [`round_to_multiple`]; neighbouring levels
/// landing on the same bucket are merged and their sizes summed. Buckets
/// that quantize to a non-positive price are dropped.
pub fn bucket_levels(snapshot: &RawSnapshot, granularity: f64) -> ExchangeResult<BucketedBook> {
    if !granularity.is_finite() || granularity <= 0.0 {
        return Err(ExchangeError::InvalidRequest(format!(
            "granularity must be a positive number (got {})",
            granularity
        )));
    }

    let mut buckets: BucketedBook = Vec::new();
    for level in snapshot.bids() {
        let price = round_to_multiple(level.price, granularity);
        if price <= 0.0 {
            continue;
        }
        match buckets.last_mut() {
            Some(last) if last.price == price => last.size += level.size,
            _ => buckets.push(BookLevel::new(price, level.size)),
        }
    }
    Ok(buckets)
}

/// Parse a `[price, size, ...]` level of decimal strings
pub fn parse_string_level(raw: &[serde_json::Value]) -> ExchangeResult<BookLevel> {
    let field = |idx: usize| -> ExchangeResult<f64> {
        raw.get(idx)
            .and_then(|v| v.as_str())
            .ok_or_else(|| ExchangeError::InvalidResponse(format!("missing level field {}", idx)))?
            .parse::<f64>()
            .map_err(|e| ExchangeError::InvalidResponse(format!("bad level field {}: {}", idx, e)))
    };
    Ok(BookLevel::new(field(0)?, field(1)?))
}

/// Parse a decimal price string, rejecting non-positive values
pub fn parse_price(raw: &str, what: &str) -> ExchangeResult<f64> {
    let value = raw
        .parse::<f64>()
        .map_err(|e| ExchangeError::InvalidResponse(format!("Invalid {}: {}", what, e)))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(ExchangeError::InvalidResponse(format!(
            "Invalid {}: {}",
            what, raw
        )));
    }
    Ok(value)
}

/// Current Unix time in milliseconds
pub fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

// =============================================================================
// Tests
// =============================================================================
