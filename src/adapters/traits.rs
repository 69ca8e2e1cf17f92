//! Market-data source trait definition
//!
//! `MarketDataSource` is the capability the support search consumes.
//! Every exchange adapter implements it; the search receives one as a
//! dependency and never inspects which exchange is behind it.

use async_trait::async_trait;

use crate::adapters::errors::ExchangeResult;
use crate::adapters::types::{bucket_levels, BucketedBook, RawSnapshot};

/// Public market data needed by the support search
///
/// # Example Implementation
///
/// ```ignore
/// use async_trait::async_trait;
///
/// struct FixedBook { snapshot: RawSnapshot }
///
/// #[async_trait]
/// impl MarketDataSource for FixedBook {
///     async fn ticker(&self, _market: &str) -> ExchangeResult<f64> { Ok(100.0) }
///     async fn average_24h(&self, _market: &str) -> ExchangeResult<f64> { Ok(100.0) }
///     async fn raw_bids(&self, _market: &str) -> ExchangeResult<RawSnapshot> {
///         Ok(self.snapshot.clone())
///     }
///     fn exchange_name(&self) -> &'static str { "fixed" }
/// }
/// ```
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Last traded price for `market`
    async fn ticker(&self, market: &str) -> ExchangeResult<f64>;

    /// Volume-weighted average price over the last 24 hours
    async fn average_24h(&self, market: &str) -> ExchangeResult<f64>;

    /// Full bid side of the order book, best bid first
    async fn raw_bids(&self, market: &str) -> ExchangeResult<RawSnapshot>;

    /// Group `snapshot` bids into buckets of width `granularity`
    ///
    /// The default merges locally with [`bucket_levels`]. Adapters backed by
    /// an exchange-side aggregation endpoint can override it.
    async fn bucket(
        &self,
        snapshot: &RawSnapshot,
        _market: &str,
        granularity: f64,
    ) -> ExchangeResult<BucketedBook> {
        bucket_levels(snapshot, granularity)
    }

    /// Exchange name identifier ("binance", "kraken", ...)
    fn exchange_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::errors::ExchangeError;
    use crate::adapters::test_utils::MockMarketData;
    use crate::adapters::types::BookLevel;

    #[tokio::test]
    async fn test_mock_source_serves_snapshot() {
        let source = MockMarketData::new(100.0, 101.0, &[(100.0, 1.0), (99.0, 2.0)]);
        assert_eq!(source.ticker("BTCUSDT").await.unwrap(), 100.0);
        assert_eq!(source.average_24h("BTCUSDT").await.unwrap(), 101.0);

        let snapshot = source.raw_bids("BTCUSDT").await.unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(source.raw_bids_calls(), 1);
    }

    #[tokio::test]
    async fn test_default_bucket_uses_local_aggregation() {
        let source = MockMarketData::new(100.0, 100.0, &[(100.0, 1.0), (99.0, 2.0)]);
        let snapshot = source.raw_bids("BTCUSDT").await.unwrap();
        let book = source.bucket(&snapshot, "BTCUSDT", 10.0).await.unwrap();
        assert_eq!(book, vec![BookLevel::new(100.0, 3.0)]);
        assert_eq!(source.requested_granularities(), vec![10.0]);
    }

    #[tokio::test]
    async fn test_failing_bucket_surfaces_error() {
        let source = MockMarketData::new(100.0, 100.0, &[(100.0, 1.0)]).fail_bucket_after(0);
        let snapshot = source.raw_bids("BTCUSDT").await.unwrap();
        let result = source.bucket(&snapshot, "BTCUSDT", 10.0).await;
        assert!(matches!(result, Err(ExchangeError::ConnectionFailed(_))));
    }

    #[tokio::test]
    async fn test_trait_object_is_usable() {
        let source: Box<dyn MarketDataSource> =
            Box::new(MockMarketData::new(50.0, 50.0, &[(49.0, 1.0)]));
        assert_eq!(source.exchange_name(), "mock");
        assert_eq!(source.ticker("ETHUSDT").await.unwrap(), 50.0);
    }
}
