//! Binance Types
//!
//! REST response types for Binance public spot endpoints.
//!
//! Docs: https://developers.binance.com/docs/binance-spot-api-docs/rest-api/market-data-endpoints
//!
//! Prices and quantities are decimal strings:
//!   /api/v3/ticker/price  -> { "symbol": "BTCUSDT", "price": "42000.10" }
//!   /api/v3/ticker/24hr   -> { ..., "weightedAvgPrice": "41873.22", ... }
//!   /api/v3/depth         -> { "lastUpdateId": 1, "bids": [["p","q"]], "asks": [...] }

use serde::Deserialize;

use crate::adapters::errors::{ExchangeError, ExchangeResult};
use crate::adapters::types::BookLevel;

/// `/api/v3/ticker/price` response
#[derive(Debug, Clone, Deserialize)]
pub struct TickerPrice {
    pub symbol: String,
    pub price: String,
}

/// `/api/v3/ticker/24hr` response (only the fields we read)
#[derive(Debug, Clone, Deserialize)]
pub struct Ticker24h {
    pub symbol: String,
    #[serde(rename = "weightedAvgPrice")]
    pub weighted_avg_price: String,
}

/// `/api/v3/depth` response
#[derive(Debug, Clone, Deserialize)]
pub struct DepthSnapshot {
    #[serde(rename = "lastUpdateId")]
    pub last_update_id: u64,
    pub bids: Vec<[String; 2]>,
}

impl DepthSnapshot {
    /// Convert bid levels to canonical `BookLevel`s
    pub fn bid_levels(&self) -> ExchangeResult<Vec<BookLevel>> {
        self.bids
            .iter()
            .map(|[price, qty]| {
                let price = price.parse::<f64>().map_err(|e| {
                    ExchangeError::InvalidResponse(format!("Invalid bid price: {}", e))
                })?;
                let qty = qty.parse::<f64>().map_err(|e| {
                    ExchangeError::InvalidResponse(format!("Invalid bid size: {}", e))
                })?;
                Ok(BookLevel::new(price, qty))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_depth_snapshot() {
        let raw = r#"{
            "lastUpdateId": 123,
            "bids": [["100.50", "2.25"], ["100.00", "1.00"]],
            "asks": [["101.50", "3.50"]]
        }"#;
        let depth: DepthSnapshot = serde_json::from_str(raw).unwrap();
        assert_eq!(depth.last_update_id, 123);
        let bids = depth.bid_levels().unwrap();
        assert_eq!(
            bids,
            vec![BookLevel::new(100.5, 2.25), BookLevel::new(100.0, 1.0)]
        );
    }

    #[test]
    fn test_bad_bid_is_rejected() {
        let raw = r#"{"lastUpdateId": 1, "bids": [["bad", "1"]]}"#;
        let depth: DepthSnapshot = serde_json::from_str(raw).unwrap();
        assert!(depth.bid_levels().is_err());
    }

    #[test]
    fn test_parse_ticker_24h() {
        let raw = r#"{"symbol":"BTCUSDT","priceChange":"-94.99","weightedAvgPrice":"41873.22","lastPrice":"42000.10"}"#;
        let ticker: Ticker24h = serde_json::from_str(raw).unwrap();
        assert_eq!(ticker.weighted_avg_price, "41873.22");
    }
}
