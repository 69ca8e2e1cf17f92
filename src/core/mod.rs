//! Core module - quantization, filters, granularity search, relaxation
//!
//! This module uses **explicit re-exports** instead of glob exports (`pub use module::*`)
//! to keep the public API visible in one place.
//!
//! ## Usage
//! Prefer importing from `crate::core`:
//! ```ignore
//! use support_finder::core::{find_support_granularity, SupportQuery, ToleranceParams};
//! ```

pub mod errors;
pub mod filters;
pub mod granularity;
pub mod quantize;
pub mod relaxation;
pub mod search;
pub mod types;

// Explicit re-exports for quantize module
pub use quantize::{round_to_multiple, round_to_precision};

// Explicit re-exports for filters module
pub use filters::FilterPipeline;

// Explicit re-exports for granularity module
pub use granularity::{
    search_granularity, GranularitySteps, GRANULARITY_FLOOR, GRANULARITY_PRECISION,
    START_GRANULARITY, STEP_RATIOS,
};

// Explicit re-exports for relaxation module
pub use relaxation::{count_targets, relax, Phase};

// Explicit re-exports for search module
pub use search::find_support_granularity;

// Explicit re-exports for types and errors
pub use errors::SearchError;
pub use types::{
    GranularityMatch, SearchRequest, SupportQuery, SupportSearch, ToleranceParams, DEFAULT_DIP,
    DEFAULT_PIP,
};
