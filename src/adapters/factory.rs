//! Adapter factory for exchange selection
//!
//! Creates `MarketDataSource` instances from configuration.
//! Uses an enum-based dispatch pattern (no `Box<dyn>`) so the search stays
//! monomorphized over the concrete adapter.

use async_trait::async_trait;

use crate::adapters::binance::{BinanceAdapter, BinanceConfig};
use crate::adapters::errors::ExchangeResult;
use crate::adapters::kraken::{KrakenAdapter, KrakenConfig};
use crate::adapters::traits::MarketDataSource;
use crate::adapters::types::{BucketedBook, RawSnapshot};
use crate::config::Exchange;

// =============================================================================
// AnyMarketData: enum-based dispatch for exchange selection
// =============================================================================

/// Enum wrapping all concrete adapter types for runtime dispatch.
pub enum AnyMarketData {
    Binance(BinanceAdapter),
    Kraken(KrakenAdapter),
}

/// Macro to reduce boilerplate for delegating trait methods
macro_rules! delegate {
    ($self:expr, $method:ident ( $($arg:expr),* )) => {
        match $self {
            AnyMarketData::Binance(a) => a.$method($($arg),*),
            AnyMarketData::Kraken(a) => a.$method($($arg),*),
        }
    };
    (await $self:expr, $method:ident ( $($arg:expr),* )) => {
        match $self {
            AnyMarketData::Binance(a) => a.$method($($arg),*).await,
            AnyMarketData::Kraken(a) => a.$method($($arg),*).await,
        }
    };
}

#[async_trait]
impl MarketDataSource for AnyMarketData {
    async fn ticker(&self, market: &str) -> ExchangeResult<f64> {
        delegate!(await self, ticker(market))
    }

    async fn average_24h(&self, market: &str) -> ExchangeResult<f64> {
        delegate!(await self, average_24h(market))
    }

    async fn raw_bids(&self, market: &str) -> ExchangeResult<RawSnapshot> {
        delegate!(await self, raw_bids(market))
    }

    async fn bucket(
        &self,
        snapshot: &RawSnapshot,
        market: &str,
        granularity: f64,
    ) -> ExchangeResult<BucketedBook> {
        delegate!(await self, bucket(snapshot, market, granularity))
    }

    fn exchange_name(&self) -> &'static str {
        delegate!(self, exchange_name())
    }
}

// =============================================================================
// Factory Functions
// =============================================================================

/// Create a market-data source for `exchange`
///
/// `sandbox` selects the exchange's test environment where one exists;
/// exchanges without one reject it.
pub fn create_market_data(exchange: &Exchange, sandbox: bool) -> ExchangeResult<AnyMarketData> {
    let source = match exchange {
        Exchange::Binance => AnyMarketData::Binance(BinanceAdapter::new(BinanceConfig::new(sandbox))),
        Exchange::Kraken => AnyMarketData::Kraken(KrakenAdapter::new(KrakenConfig::new(sandbox)?)),
    };
    tracing::debug!(
        exchange = source.exchange_name(),
        sandbox,
        "Market data source created"
    );
    Ok(source)
}
