//! Top-level support search

use tracing::debug;

use crate::adapters::traits::MarketDataSource;
use crate::core::errors::SearchError;
use crate::core::relaxation::relax;
use crate::core::types::{SearchRequest, SupportQuery, SupportSearch};

/// Find a granularity giving enough support levels for `query.market`
///
/// Ticker, 24h average and the bid snapshot are fetched once, in that order.
/// The snapshot is then only re-bucketed, never re-fetched.
pub async fn find_support_granularity<S>(
    source: &S,
    query: &SupportQuery,
) -> Result<SupportSearch, SearchError>
where
    S: MarketDataSource + ?Sized,
{
    let market = query.market.as_str();
    let ticker = source.ticker(market).await?;
    let average = source.average_24h(market).await?;
    let snapshot = source.raw_bids(market).await?;

    debug!(
        exchange = source.exchange_name(),
        market,
        ticker,
        average,
        bids = snapshot.len(),
        best_bid = ?snapshot.best_bid(),
        timestamp = snapshot.timestamp,
        "Market data fetched"
    );

    let request = SearchRequest {
        market: query.market.clone(),
        ticker,
        average,
        tolerance: query.tolerance,
        top: query.top,
        strict: query.strict,
    };

    relax(source, &snapshot, &request).await
}
