//! Shared helpers for exchange adapters
//!
//! Common plumbing used by every REST adapter: request pacing and
//! HTTP response handling.

pub mod http;
pub mod throttle;

pub use http::get_json;
pub use throttle::RequestThrottle;
