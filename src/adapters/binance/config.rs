//! Binance Configuration
//!
//! Endpoint selection for Binance public spot market data.

use crate::config::constants;

// =============================================================================
// Constants
// =============================================================================

/// Mainnet REST URL
const MAINNET_REST_URL: &str = "https://api.binance.com";
/// Spot testnet REST URL
const TESTNET_REST_URL: &str = "https://testnet.binance.vision";
/// Largest depth snapshot the REST endpoint serves
const MAX_DEPTH_LIMIT: u32 = 5000;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for Binance public market data
#[derive(Debug, Clone)]
pub struct BinanceConfig {
    /// Use the spot testnet instead of production
    pub sandbox: bool,
    /// Number of depth levels requested per snapshot
    pub depth_limit: u32,
    /// Explicit REST base URL, overrides `sandbox` (tests, proxies)
    pub base_url: Option<String>,
}

impl Default for BinanceConfig {
    fn default() -> Self {
        Self::new(false)
    }
}

impl BinanceConfig {
    pub fn new(sandbox: bool) -> Self {
        Self {
            sandbox,
            depth_limit: constants::depth_limit().min(MAX_DEPTH_LIMIT),
            base_url: None,
        }
    }

    /// Point the adapter at a custom REST endpoint
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Get REST base URL
    pub fn rest_url(&self) -> &str {
        match &self.base_url {
            Some(url) => url.as_str(),
            None if self.sandbox => TESTNET_REST_URL,
            None => MAINNET_REST_URL,
        }
    }
}
