//! Kraken Adapter Implementation
//!
//! REST adapter for Kraken public market data (Ticker + Depth).

use async_trait::async_trait;

use crate::adapters::errors::{ExchangeError, ExchangeResult};
use crate::adapters::shared::{get_json, RequestThrottle};
use crate::adapters::traits::MarketDataSource;
use crate::adapters::types::{create_http_client, now_millis, parse_price, RawSnapshot};

use super::config::KrakenConfig;
use super::types::{DepthInfo, KrakenResponse, TickerInfo};

/// Kraken adapter implementing `MarketDataSource`
pub struct KrakenAdapter {
    config: KrakenConfig,
    http: reqwest::Client,
    throttle: RequestThrottle,
}

impl KrakenAdapter {
    pub fn new(config: KrakenConfig) -> Self {
        Self {
            config,
            http: create_http_client("kraken"),
            throttle: RequestThrottle::default(),
        }
    }

    pub fn with_throttle(mut self, throttle: RequestThrottle) -> Self {
        self.throttle = throttle;
        self
    }

    async fn fetch_ticker(&self, market: &str) -> ExchangeResult<TickerInfo> {
        let url = format!("{}/0/public/Ticker?pair={}", self.config.rest_url(), market);
        let response: KrakenResponse<TickerInfo> =
            get_json(&self.http, &self.throttle, "kraken", &url).await?;
        response.into_pair(market)
    }
}

#[async_trait]
impl MarketDataSource for KrakenAdapter {
    async fn ticker(&self, market: &str) -> ExchangeResult<f64> {
        let ticker = self.fetch_ticker(market).await?;
        let last = ticker
            .last_price()
            .ok_or_else(|| ExchangeError::InvalidResponse("kraken ticker missing c[0]".into()))?;
        parse_price(last, "ticker price")
    }

    async fn average_24h(&self, market: &str) -> ExchangeResult<f64> {
        let ticker = self.fetch_ticker(market).await?;
        let vwap = ticker
            .vwap_24h()
            .ok_or_else(|| ExchangeError::InvalidResponse("kraken ticker missing p[1]".into()))?;
        parse_price(vwap, "24h vwap")
    }

    async fn raw_bids(&self, market: &str) -> ExchangeResult<RawSnapshot> {
        let url = format!(
            "{}/0/public/Depth?pair={}&count={}",
            self.config.rest_url(),
            market,
            self.config.depth_count
        );
        let response: KrakenResponse<DepthInfo> =
            get_json(&self.http, &self.throttle, "kraken", &url).await?;
        let bids = response.into_pair(market)?.bid_levels()?;
        if bids.is_empty() {
            return Err(ExchangeError::InvalidResponse(format!(
                "kraken returned no bids for {}",
                market
            )));
        }

        tracing::debug!(
            exchange = "kraken",
            market = %market,
            levels = bids.len(),
            "Depth snapshot fetched"
        );
        Ok(RawSnapshot::new(market, bids, now_millis()))
    }

    fn exchange_name(&self) -> &'static str {
        "kraken"
    }
}
