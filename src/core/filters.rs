//! Support filter pipeline
//!
//! Four price predicates applied in a fixed order to a bucketed book:
//!
//! 1. above ticker: a bid above the last trade cannot act as support
//! 2. below floor: explicit `min`, else `ticker * (1 - pip%)` when pip < 100
//! 3. above dip cap: `average * (1 - dip%)`, only when dip > 0
//! 4. above max: only when max > 0
//!
//! Every comparison is strict, so a level sitting exactly on a bound is kept.
//! Filters only remove levels and never reorder the survivors.

use crate::adapters::types::BookLevel;
use crate::core::types::ToleranceParams;

/// Filter chain for one ticker/average/tolerance combination
///
/// The floor is resolved once at construction, so a pipeline built for a
/// given pip keeps using that pip's floor for every granularity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterPipeline {
    ticker: f64,
    floor: Option<f64>,
    dip_cap: Option<f64>,
    max: Option<f64>,
}

impl FilterPipeline {
    pub fn new(ticker: f64, average: f64, tolerance: &ToleranceParams) -> Self {
        let floor = if tolerance.min > 0.0 {
            Some(tolerance.min)
        } else if tolerance.pip < 100.0 {
            Some(ticker * (1.0 - tolerance.pip / 100.0))
        } else {
            None
        };
        let dip_cap = (tolerance.dip > 0.0).then(|| average * (1.0 - tolerance.dip / 100.0));
        let max = (tolerance.max > 0.0).then_some(tolerance.max);

        Self {
            ticker,
            floor,
            dip_cap,
            max,
        }
    }

    /// Effective floor price, if any
    pub fn floor(&self) -> Option<f64> {
        self.floor
    }

    /// Effective dip cap price, if any
    pub fn dip_cap(&self) -> Option<f64> {
        self.dip_cap
    }

    /// Run all four stages in order
    pub fn apply(&self, mut levels: Vec<BookLevel>) -> Vec<BookLevel> {
        self.drop_above_ticker(&mut levels);
        self.drop_below_floor(&mut levels);
        self.drop_above_dip_cap(&mut levels);
        self.drop_above_max(&mut levels);
        levels
    }

    pub fn drop_above_ticker(&self, levels: &mut Vec<BookLevel>) {
        let ticker = self.ticker;
        levels.retain(|l| l.price <= ticker);
    }

    pub fn drop_below_floor(&self, levels: &mut Vec<BookLevel>) {
        if let Some(floor) = self.floor {
            levels.retain(|l| l.price >= floor);
        }
    }

    pub fn drop_above_dip_cap(&self, levels: &mut Vec<BookLevel>) {
        if let Some(cap) = self.dip_cap {
            levels.retain(|l| l.price <= cap);
        }
    }

    pub fn drop_above_max(&self, levels: &mut Vec<BookLevel>) {
        if let Some(max) = self.max {
            levels.retain(|l| l.price <= max);
        }
    }
}
