//! Binance Adapter Implementation
//!
//! REST adapter for Binance spot public market data: last price, 24h
//! weighted average and the bid side of the depth snapshot.
//!
//! Docs: https://developers.binance.com/docs/binance-spot-api-docs/rest-api/market-data-endpoints

use async_trait::async_trait;

use crate::adapters::errors::{ExchangeError, ExchangeResult};
use crate::adapters::shared::{get_json, RequestThrottle};
use crate::adapters::traits::MarketDataSource;
use crate::adapters::types::{create_http_client, now_millis, parse_price, RawSnapshot};

use super::config::BinanceConfig;
use super::types::{DepthSnapshot, Ticker24h, TickerPrice};

// =============================================================================
// BinanceAdapter
// =============================================================================

/// Binance spot adapter implementing `MarketDataSource`
pub struct BinanceAdapter {
    config: BinanceConfig,
    http: reqwest::Client,
    throttle: RequestThrottle,
}

impl BinanceAdapter {
    /// Create a new BinanceAdapter
    pub fn new(config: BinanceConfig) -> Self {
        Self {
            config,
            http: create_http_client("binance"),
            throttle: RequestThrottle::default(),
        }
    }

    /// Replace the request throttle (tests use a zero interval)
    pub fn with_throttle(mut self, throttle: RequestThrottle) -> Self {
        self.throttle = throttle;
        self
    }

    pub fn config(&self) -> &BinanceConfig {
        &self.config
    }

    fn url(&self, path: &str, query: &str) -> String {
        format!("{}{}?{}", self.config.rest_url(), path, query)
    }
}

#[async_trait]
impl MarketDataSource for BinanceAdapter {
    async fn ticker(&self, market: &str) -> ExchangeResult<f64> {
        let url = self.url("/api/v3/ticker/price", &format!("symbol={}", market));
        let ticker: TickerPrice = get_json(&self.http, &self.throttle, "binance", &url).await?;
        parse_price(&ticker.price, "ticker price")
    }

    async fn average_24h(&self, market: &str) -> ExchangeResult<f64> {
        let url = self.url("/api/v3/ticker/24hr", &format!("symbol={}", market));
        let stats: Ticker24h = get_json(&self.http, &self.throttle, "binance", &url).await?;
        parse_price(&stats.weighted_avg_price, "24h weighted average")
    }

    async fn raw_bids(&self, market: &str) -> ExchangeResult<RawSnapshot> {
        let url = self.url(
            "/api/v3/depth",
            &format!("symbol={}&limit={}", market, self.config.depth_limit),
        );
        let depth: DepthSnapshot = get_json(&self.http, &self.throttle, "binance", &url).await?;
        let bids = depth.bid_levels()?;
        if bids.is_empty() {
            return Err(ExchangeError::InvalidResponse(format!(
                "binance returned no bids for {}",
                market
            )));
        }

        tracing::debug!(
            exchange = "binance",
            market = %market,
            last_update_id = depth.last_update_id,
            levels = bids.len(),
            "Depth snapshot fetched"
        );
        Ok(RawSnapshot::new(market, bids, now_millis()))
    }

    fn exchange_name(&self) -> &'static str {
        "binance"
    }
}

// =============================================================================
// Tests
// =============================================================================
