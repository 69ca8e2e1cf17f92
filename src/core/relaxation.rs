//! Tolerance relaxation
//!
//! Wraps the granularity search in an outer loop over count targets and,
//! unless strict, widens the tolerances one unit at a time:
//!
//! - phase A raises pip up to 50
//! - phase B lowers dip down to 0
//! - phase C raises pip up to 100
//!
//! The caller's fractional dip/pip are only used for the first sweep; every
//! relaxed sweep works on their rounded integer values.

use tracing::{debug, info};

use crate::adapters::traits::MarketDataSource;
use crate::adapters::types::RawSnapshot;
use crate::core::errors::SearchError;
use crate::core::granularity::search_granularity;
use crate::core::types::{GranularityMatch, SearchRequest, SupportSearch, ToleranceParams};

/// Pip ceiling for phase A
pub const PHASE_A_PIP_LIMIT: f64 = 50.0;
/// Pip ceiling for phase C
pub const PHASE_C_PIP_LIMIT: f64 = 100.0;

/// Required level counts tried for `top`, largest first
///
/// `max(top, 4)` down to `max(top, 2)`.
pub fn count_targets(top: usize) -> Vec<usize> {
    (top.max(2)..=top.max(4)).rev().collect()
}

/// Phase of the relaxation loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Initial,
    RaisePip,
    LowerDip,
    WidenPip,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Initial => write!(f, "initial"),
            Phase::RaisePip => write!(f, "raise_pip"),
            Phase::LowerDip => write!(f, "lower_dip"),
            Phase::WidenPip => write!(f, "widen_pip"),
        }
    }
}

/// One relaxation run over a fixed snapshot
struct Sweeper<'a, S: ?Sized> {
    source: &'a S,
    snapshot: &'a RawSnapshot,
    request: &'a SearchRequest,
    targets: Vec<usize>,
    attempts: usize,
    last_thin: Option<SearchError>,
}

impl<'a, S> Sweeper<'a, S>
where
    S: MarketDataSource + ?Sized,
{
    fn new(source: &'a S, snapshot: &'a RawSnapshot, request: &'a SearchRequest) -> Self {
        Self {
            source,
            snapshot,
            request,
            targets: count_targets(request.top),
            attempts: 0,
            last_thin: None,
        }
    }

    /// Try every count target at `tolerance`
    ///
    /// `Ok(None)` means every target produced a thin book.
    async fn sweep(
        &mut self,
        phase: Phase,
        tolerance: ToleranceParams,
    ) -> Result<Option<GranularityMatch>, SearchError> {
        for &cnt in &self.targets {
            self.attempts += 1;
            debug!(
                market = %self.request.market,
                %phase,
                dip = tolerance.dip,
                pip = tolerance.pip,
                cnt,
                "Running granularity search"
            );
            match search_granularity(
                self.source,
                self.snapshot,
                self.request.ticker,
                self.request.average,
                &tolerance,
                cnt,
            )
            .await
            {
                Ok(found) => return Ok(Some(found)),
                Err(thin @ SearchError::ThinBook { .. }) => self.last_thin = Some(thin),
                Err(e) => return Err(e),
            }
        }
        Ok(None)
    }

    fn finish(&self, found: GranularityMatch, tolerance: ToleranceParams, relaxed: bool) -> SupportSearch {
        info!(
            market = %self.request.market,
            granularity = found.granularity,
            dip = tolerance.dip,
            pip = tolerance.pip,
            levels = found.levels.len(),
            relaxed,
            attempts = self.attempts,
            "Support granularity found"
        );
        SupportSearch {
            granularity: found.granularity,
            dip: tolerance.dip,
            pip: tolerance.pip,
            levels: found.levels,
            relaxed,
            attempts: self.attempts,
        }
    }

    fn exhausted(self, tolerance: ToleranceParams) -> SearchError {
        let required = self.targets.last().copied().unwrap_or(2);
        self.last_thin.unwrap_or_else(|| {
            SearchError::thin_book(self.request.market.clone(), required, tolerance.dip, tolerance.pip)
        })
    }
}

/// Search for a support granularity, relaxing dip/pip when needed
///
/// Exchange errors abort immediately. When nothing works the most recent
/// thin-book error is returned.
pub async fn relax<S>(
    source: &S,
    snapshot: &RawSnapshot,
    request: &SearchRequest,
) -> Result<SupportSearch, SearchError>
where
    S: MarketDataSource + ?Sized,
{
    let original = request.tolerance;
    let mut sweeper = Sweeper::new(source, snapshot, request);

    if let Some(found) = sweeper.sweep(Phase::Initial, original).await? {
        return Ok(sweeper.finish(found, original, false));
    }

    if request.strict {
        debug!(market = %request.market, "Strict mode, skipping relaxation");
        return Err(sweeper.exhausted(original));
    }

    let mut dip = original.dip.round();
    let mut pip = original.pip.round();

    info!(market = %request.market, phase = %Phase::RaisePip, dip, pip, "Relaxing tolerances");
    while pip < PHASE_A_PIP_LIMIT {
        pip += 1.0;
        let tolerance = original.with_dip_pip(dip, pip);
        if let Some(found) = sweeper.sweep(Phase::RaisePip, tolerance).await? {
            return Ok(sweeper.finish(found, tolerance, true));
        }
    }

    info!(market = %request.market, phase = %Phase::LowerDip, dip, pip, "Relaxing tolerances");
    while dip > 0.0 {
        dip -= 1.0;
        let tolerance = original.with_dip_pip(dip, pip);
        if let Some(found) = sweeper.sweep(Phase::LowerDip, tolerance).await? {
            return Ok(sweeper.finish(found, tolerance, true));
        }
    }

    info!(market = %request.market, phase = %Phase::WidenPip, dip, pip, "Relaxing tolerances");
    while pip < PHASE_C_PIP_LIMIT {
        pip += 1.0;
        let tolerance = original.with_dip_pip(dip, pip);
        if let Some(found) = sweeper.sweep(Phase::WidenPip, tolerance).await? {
            return Ok(sweeper.finish(found, tolerance, true));
        }
    }

    Err(sweeper.exhausted(original.with_dip_pip(dip, pip)))
}
