//! Kraken Configuration

use crate::adapters::errors::{ExchangeError, ExchangeResult};
use crate::config::constants;

/// Public REST URL
const MAINNET_REST_URL: &str = "https://api.kraken.com";
/// Largest depth snapshot the public Depth endpoint serves
const MAX_DEPTH_COUNT: u32 = 500;

/// Configuration for Kraken public market data
#[derive(Debug, Clone)]
pub struct KrakenConfig {
    /// Number of depth levels requested per snapshot
    pub depth_count: u32,
    /// Explicit REST base URL (tests, proxies)
    pub base_url: Option<String>,
}

impl Default for KrakenConfig {
    fn default() -> Self {
        Self {
            depth_count: constants::depth_limit().min(MAX_DEPTH_COUNT),
            base_url: None,
        }
    }
}

impl KrakenConfig {
    /// Build a config for the requested environment
    ///
    /// Kraken spot has no public sandbox, so `sandbox = true` is rejected.
    pub fn new(sandbox: bool) -> ExchangeResult<Self> {
        if sandbox {
            return Err(ExchangeError::InvalidRequest(
                "kraken has no public sandbox environment".to_string(),
            ));
        }
        Ok(Self::default())
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn rest_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(MAINNET_REST_URL)
    }
}
