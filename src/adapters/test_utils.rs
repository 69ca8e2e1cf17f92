//! Shared test utilities for market-data testing
//!
//! Provides a scripted `MockMarketData` source that records every
//! granularity the search asks it to bucket.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::adapters::errors::{ExchangeError, ExchangeResult};
use crate::adapters::traits::MarketDataSource;
use crate::adapters::types::{bucket_levels, BookLevel, BucketedBook, RawSnapshot};

/// In-memory market-data source for search tests
pub struct MockMarketData {
    /// Price returned by `ticker()`
    pub ticker: f64,
    /// Price returned by `average_24h()`
    pub average: f64,
    /// Bids served by `raw_bids()`
    pub bids: Vec<BookLevel>,
    /// When set, `ticker()` fails
    pub fail_ticker: bool,
    /// When set, `bucket()` fails once this many calls succeeded
    pub fail_bucket_after: Option<usize>,
    raw_bids_calls: AtomicUsize,
    bucket_calls: AtomicUsize,
    granularities: Mutex<Vec<f64>>,
}

impl MockMarketData {
    pub fn new(ticker: f64, average: f64, bids: &[(f64, f64)]) -> Self {
        Self {
            ticker,
            average,
            bids: bids.iter().map(|&(p, s)| BookLevel::new(p, s)).collect(),
            fail_ticker: false,
            fail_bucket_after: None,
            raw_bids_calls: AtomicUsize::new(0),
            bucket_calls: AtomicUsize::new(0),
            granularities: Mutex::new(Vec::new()),
        }
    }

    /// Make `bucket()` fail after `successes` successful calls
    pub fn fail_bucket_after(mut self, successes: usize) -> Self {
        self.fail_bucket_after = Some(successes);
        self
    }

    pub fn raw_bids_calls(&self) -> usize {
        self.raw_bids_calls.load(Ordering::Relaxed)
    }

    pub fn bucket_calls(&self) -> usize {
        self.bucket_calls.load(Ordering::Relaxed)
    }

    /// Every granularity passed to `bucket()`, in call order
    pub fn requested_granularities(&self) -> Vec<f64> {
        self.granularities.lock().map(|g| g.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl MarketDataSource for MockMarketData {
    async fn ticker(&self, _market: &str) -> ExchangeResult<f64> {
        if self.fail_ticker {
            return Err(ExchangeError::ConnectionFailed("mock ticker down".into()));
        }
        Ok(self.ticker)
    }

    async fn average_24h(&self, _market: &str) -> ExchangeResult<f64> {
        Ok(self.average)
    }

    async fn raw_bids(&self, market: &str) -> ExchangeResult<RawSnapshot> {
        self.raw_bids_calls.fetch_add(1, Ordering::Relaxed);
        Ok(RawSnapshot::new(market, self.bids.clone(), 0))
    }

    async fn bucket(
        &self,
        snapshot: &RawSnapshot,
        _market: &str,
        granularity: f64,
    ) -> ExchangeResult<BucketedBook> {
        let calls = self.bucket_calls.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut seen) = self.granularities.lock() {
            seen.push(granularity);
        }
        if matches!(self.fail_bucket_after, Some(limit) if calls >= limit) {
            return Err(ExchangeError::ConnectionFailed("mock bucket down".into()));
        }
        bucket_levels(snapshot, granularity)
    }

    fn exchange_name(&self) -> &'static str {
        "mock"
    }
}
