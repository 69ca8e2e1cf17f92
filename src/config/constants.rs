//! Application-wide constants and configuration defaults
//!
//! Values can be overridden via environment variables (a `.env` file is
//! loaded at startup).

use std::time::Duration;

// =============================================================================
// Files
// =============================================================================

/// Path of the YAML market list (default: `config.yaml`)
///
/// Environment variable: `SUPPORT_CONFIG_PATH`
pub fn config_path() -> String {
    std::env::var("SUPPORT_CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string())
}

// =============================================================================
// HTTP Configuration
// =============================================================================

/// Whole-request timeout for market-data calls (default: 3000ms)
///
/// Environment variable: `HTTP_TIMEOUT_MS`
pub fn http_timeout() -> Duration {
    let ms = std::env::var("HTTP_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(3000);
    Duration::from_millis(ms)
}

/// TCP connect timeout (default: 1500ms)
///
/// Environment variable: `HTTP_CONNECT_TIMEOUT_MS`
pub fn http_connect_timeout() -> Duration {
    let ms = std::env::var("HTTP_CONNECT_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(1500);
    Duration::from_millis(ms)
}

/// Minimum spacing between two requests from one adapter (default: 100ms)
///
/// Environment variable: `MIN_REQUEST_INTERVAL_MS`
pub fn min_request_interval() -> Duration {
    let ms = std::env::var("MIN_REQUEST_INTERVAL_MS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(100);
    Duration::from_millis(ms)
}

// =============================================================================
// Order Book
// =============================================================================

/// Number of bid levels requested per snapshot (default: 1000)
///
/// Adapters cap this at their exchange maximum.
///
/// Environment variable: `DEPTH_LIMIT`
pub fn depth_limit() -> u32 {
    std::env::var("DEPTH_LIMIT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(1000)
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Print all configuration values (for debugging/startup logs)
pub fn log_configuration() {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("  - Config path: {}", config_path());
    tracing::info!("HTTP:");
    tracing::info!("  - Request timeout: {:?}", http_timeout());
    tracing::info!("  - Connect timeout: {:?}", http_connect_timeout());
    tracing::info!("  - Min request interval: {:?}", min_request_interval());
    tracing::info!("Order book:");
    tracing::info!("  - Depth limit: {}", depth_limit());
    tracing::info!("==================================");
}
