//! Granularity search
//!
//! Walks a fixed cycle of bucket widths from coarse to fine and returns the
//! first width whose filtered book holds enough support levels.

use tracing::debug;

use crate::adapters::traits::MarketDataSource;
use crate::adapters::types::RawSnapshot;
use crate::core::errors::SearchError;
use crate::core::filters::FilterPipeline;
use crate::core::quantize::round_to_precision;
use crate::core::types::{GranularityMatch, ToleranceParams};

// =============================================================================
// Constants
// =============================================================================

/// Coarsest bucket width tried
pub const START_GRANULARITY: f64 = 500.0;

/// Multipliers applied in turn (500 seeds 250 → 100 → 50 → 25 → 20 → 10 → 5 …)
pub const STEP_RATIOS: [f64; 7] = [0.5, 0.4, 0.5, 0.5, 0.8, 0.5, 0.5];

/// Finest bucket width; the search halts once it is reached
pub const GRANULARITY_FLOOR: f64 = 1e-8;

/// Decimal places each step is rounded to
pub const GRANULARITY_PRECISION: i32 = 8;

// =============================================================================
// Step iterator
// =============================================================================

/// Finite, strictly decreasing sequence of bucket widths
///
/// Seeded with `START_GRANULARITY`; every yielded value is the previous one
/// times the next cycle ratio, rounded to `GRANULARITY_PRECISION` decimals.
/// The first value is 250 and the last is `GRANULARITY_FLOOR`.
#[derive(Debug, Clone)]
pub struct GranularitySteps {
    current: f64,
    ratio_index: usize,
    done: bool,
}

impl GranularitySteps {
    pub fn new() -> Self {
        Self {
            current: START_GRANULARITY,
            ratio_index: 0,
            done: false,
        }
    }

    /// Whether `granularity` is at or below the floor
    pub fn is_floor(granularity: f64) -> bool {
        granularity <= GRANULARITY_FLOOR
    }
}

impl Default for GranularitySteps {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for GranularitySteps {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.done {
            return None;
        }
        let ratio = STEP_RATIOS[self.ratio_index % STEP_RATIOS.len()];
        self.ratio_index += 1;

        let next = round_to_precision(self.current * ratio, GRANULARITY_PRECISION);
        debug_assert!(
            next > 0.0 && next < self.current,
            "granularity step must shrink: {} -> {}",
            self.current,
            next
        );
        self.current = next;
        self.done = Self::is_floor(next);
        Some(next)
    }
}

// =============================================================================
// Search
// =============================================================================

/// Find the coarsest granularity leaving at least `cnt` support levels
///
/// The filter pipeline (and therefore the floor) is built once for this call.
/// At the floor granularity any non-empty result is accepted. Collaborator
/// failures are returned immediately.
pub async fn search_granularity<S>(
    source: &S,
    snapshot: &RawSnapshot,
    ticker: f64,
    average: f64,
    tolerance: &ToleranceParams,
    cnt: usize,
) -> Result<GranularityMatch, SearchError>
where
    S: MarketDataSource + ?Sized,
{
    let market = snapshot.market.as_str();
    let pipeline = FilterPipeline::new(ticker, average, tolerance);

    for granularity in GranularitySteps::new() {
        let bucketed = source.bucket(snapshot, market, granularity).await?;
        let buckets = bucketed.len();
        let levels = pipeline.apply(bucketed);

        debug!(
            market,
            granularity,
            buckets,
            survivors = levels.len(),
            cnt,
            "Granularity tested"
        );

        if levels.len() >= cnt {
            return Ok(GranularityMatch {
                granularity,
                levels,
            });
        }

        if GranularitySteps::is_floor(granularity) {
            if !levels.is_empty() {
                debug!(market, granularity, survivors = levels.len(), "Accepting floor granularity");
                return Ok(GranularityMatch {
                    granularity,
                    levels,
                });
            }
            break;
        }
    }

    Err(SearchError::thin_book(market, cnt, tolerance.dip, tolerance.pip))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::errors::ExchangeError;
    use crate::adapters::test_utils::MockMarketData;
    use crate::adapters::MarketDataSource;

    fn four_levels() -> MockMarketData {
        MockMarketData::new(100.0, 100.0, &[(100.0, 1.0), (99.0, 1.0), (98.0, 1.0), (97.0, 1.0)])
    }

    #[test]
    fn test_steps_start_with_cycle() {
        let steps: Vec<f64> = GranularitySteps::new().take(10).collect();
        assert_eq!(
            steps,
            vec![250.0, 100.0, 50.0, 25.0, 20.0, 10.0, 5.0, 2.5, 1.0, 0.5]
        );
    }

    #[test]
    fn test_steps_strictly_decrease_and_terminate() {
        let steps: Vec<f64> = GranularitySteps::new().collect();
        assert_eq!(steps.len(), 37);
        assert!(steps.windows(2).all(|w| w[1] < w[0]));
        assert!(steps.iter().all(|g| *g > 0.0));
        assert_eq!(
            &steps[steps.len() - 6..],
            &[2.5e-7, 2e-7, 1e-7, 5e-8, 2e-8, GRANULARITY_FLOOR]
        );
        assert!(steps[..steps.len() - 1].iter().all(|g| !GranularitySteps::is_floor(*g)));
    }

    #[test]
    fn test_start_granularity_is_never_tested() {
        assert!(GranularitySteps::new().all(|g| g < START_GRANULARITY));
    }

    #[tokio::test]
    async fn test_wide_book_resolves_at_first_step() {
        // 1000 and 400 already separate at 250 (1000 and 500)
        let source = MockMarketData::new(1000.0, 1000.0, &[(1000.0, 1.0), (400.0, 1.0)]);
        let snapshot = source.raw_bids("TEST").await.unwrap();
        let tolerance = ToleranceParams::new(0.0, 100.0, 0.0, 0.0);

        let found = search_granularity(&source, &snapshot, 1000.0, 1000.0, &tolerance, 2)
            .await
            .unwrap();

        assert_eq!(found.granularity, 250.0);
        let prices: Vec<f64> = found.levels.iter().map(|l| l.price).collect();
        assert_eq!(prices, vec![1000.0, 500.0]);
        assert_eq!(source.requested_granularities(), vec![250.0]);
    }

    #[tokio::test]
    async fn test_first_separating_granularity_wins() {
        let source = four_levels();
        let snapshot = source.raw_bids("TEST").await.unwrap();
        let tolerance = ToleranceParams::new(0.0, 30.0, 0.0, 0.0);

        let found = search_granularity(&source, &snapshot, 100.0, 100.0, &tolerance, 2)
            .await
            .unwrap();

        assert_eq!(found.granularity, 5.0);
        let prices: Vec<f64> = found.levels.iter().map(|l| l.price).collect();
        assert_eq!(prices, vec![100.0, 95.0]);
        assert_eq!(found.levels[0].size, 3.0);
    }

    #[tokio::test]
    async fn test_requested_granularities_decrease() {
        let source = MockMarketData::new(101.0, 100.0, &[(100.0, 1.0)]);
        let snapshot = source.raw_bids("TEST").await.unwrap();
        let tolerance = ToleranceParams::new(0.0, 30.0, 0.0, 0.0);

        let found = search_granularity(&source, &snapshot, 101.0, 100.0, &tolerance, 2)
            .await
            .unwrap();

        // single level only clears the floor guard
        assert!(GranularitySteps::is_floor(found.granularity));
        assert_eq!(found.levels.len(), 1);
        let requested = source.requested_granularities();
        assert_eq!(requested.len(), 37);
        assert!(requested.windows(2).all(|w| w[1] < w[0]));
    }

    #[tokio::test]
    async fn test_empty_at_floor_is_thin_book() {
        let source = four_levels();
        let snapshot = source.raw_bids("TEST").await.unwrap();
        // dip cap at 50 removes every bid
        let tolerance = ToleranceParams::new(50.0, 60.0, 0.0, 0.0);

        let err = search_granularity(&source, &snapshot, 100.0, 100.0, &tolerance, 2)
            .await
            .unwrap_err();

        match err {
            SearchError::ThinBook {
                market,
                required,
                dip,
                pip,
            } => {
                assert_eq!(market, "TEST");
                assert_eq!(required, 2);
                assert_eq!(dip, 50.0);
                assert_eq!(pip, 60.0);
            }
            other => panic!("Expected ThinBook, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_bucket_failure_propagates() {
        let source = four_levels().fail_bucket_after(3);
        let snapshot = source.raw_bids("TEST").await.unwrap();
        let tolerance = ToleranceParams::new(0.0, 30.0, 0.0, 0.0);

        let err = search_granularity(&source, &snapshot, 100.0, 100.0, &tolerance, 2)
            .await
            .unwrap_err();

        assert!(matches!(err, SearchError::Exchange(ExchangeError::ConnectionFailed(_))));
        assert_eq!(source.bucket_calls(), 4);
    }
}
