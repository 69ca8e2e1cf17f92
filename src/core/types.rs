//! Search parameter and result types

use serde::{Deserialize, Serialize};

use crate::adapters::types::BookLevel;
use crate::core::quantize::round_to_multiple;

/// Default percent below the 24h average a support may sit at
pub const DEFAULT_DIP: f64 = 5.0;
/// Default percent below the ticker that bounds the search floor
pub const DEFAULT_PIP: f64 = 30.0;

/// Price tolerances applied by the filter pipeline
///
/// `dip` and `pip` are percentages. `max` and `min` are absolute prices
/// where `0` means unset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToleranceParams {
    /// Percent below the 24h average that caps support prices
    pub dip: f64,
    /// Percent below the ticker that floors support prices
    pub pip: f64,
    /// Absolute price ceiling (0 = unset)
    pub max: f64,
    /// Absolute price floor (0 = unset), takes precedence over `pip`
    pub min: f64,
}

impl Default for ToleranceParams {
    fn default() -> Self {
        Self {
            dip: DEFAULT_DIP,
            pip: DEFAULT_PIP,
            max: 0.0,
            min: 0.0,
        }
    }
}

impl ToleranceParams {
    pub fn new(dip: f64, pip: f64, max: f64, min: f64) -> Self {
        Self { dip, pip, max, min }
    }

    /// Same bounds with different dip/pip
    pub fn with_dip_pip(self, dip: f64, pip: f64) -> Self {
        Self { dip, pip, ..self }
    }
}

/// Everything one relaxation run needs besides the order book itself
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Exchange symbol
    pub market: String,
    /// Last traded price
    pub ticker: f64,
    /// 24h volume-weighted average price
    pub average: f64,
    /// Caller tolerances (never mutated by the search)
    pub tolerance: ToleranceParams,
    /// Desired number of support levels
    pub top: usize,
    /// Disable dip/pip relaxation
    pub strict: bool,
}

/// Caller input for a full support search against a live source
#[derive(Debug, Clone)]
pub struct SupportQuery {
    pub market: String,
    pub tolerance: ToleranceParams,
    pub top: usize,
    pub strict: bool,
}

impl SupportQuery {
    pub fn new(market: impl Into<String>, tolerance: ToleranceParams, top: usize) -> Self {
        Self {
            market: market.into(),
            tolerance,
            top,
            strict: false,
        }
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Outcome of one granularity search that found enough levels
#[derive(Debug, Clone, PartialEq)]
pub struct GranularityMatch {
    /// Bucket width that produced the levels
    pub granularity: f64,
    /// Filtered bucketed levels, best first
    pub levels: Vec<BookLevel>,
}

/// Successful support search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupportSearch {
    /// Winning bucket width (> 0)
    pub granularity: f64,
    /// Dip in effect when the search succeeded
    pub dip: f64,
    /// Pip in effect when the search succeeded
    pub pip: f64,
    /// Surviving support levels at `granularity`, best first
    pub levels: Vec<BookLevel>,
    /// True when dip or pip had to be relaxed
    pub relaxed: bool,
    /// Number of granularity searches run
    pub attempts: usize,
}

impl SupportSearch {
    /// Support levels with prices snapped onto the granularity grid
    pub fn display_levels(&self) -> Vec<BookLevel> {
        self.levels
            .iter()
            .map(|l| BookLevel::new(round_to_multiple(l.price, self.granularity), l.size))
            .collect()
    }
}
