//! Configuration types for the market list
//!
//! This module defines the structs loaded from YAML and their validation
//! rules.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::core::types::{SupportQuery, ToleranceParams, DEFAULT_DIP, DEFAULT_PIP};
use crate::error::AppError;

// ============================================================================
// Enums
// ============================================================================

/// Supported exchanges
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Exchange {
    Binance,
    Kraken,
}

impl std::fmt::Display for Exchange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Exchange::Binance => write!(f, "binance"),
            Exchange::Kraken => write!(f, "kraken"),
        }
    }
}

// ============================================================================
// Serde defaults
// ============================================================================

fn default_dip() -> f64 {
    DEFAULT_DIP
}

fn default_pip() -> f64 {
    DEFAULT_PIP
}

fn default_top() -> usize {
    4
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// One market to search supports for
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketConfig {
    /// Exchange serving the market
    pub exchange: Exchange,
    /// Exchange symbol (e.g., "BTCUSDT", "XBTUSD")
    pub symbol: String,
    /// Percent below the 24h average a support may sit at
    #[serde(default = "default_dip")]
    pub dip: f64,
    /// Percent below the ticker bounding the search (must exceed dip)
    #[serde(default = "default_pip")]
    pub pip: f64,
    /// Absolute price ceiling (0 = unset)
    #[serde(default)]
    pub max: f64,
    /// Absolute price floor (0 = unset)
    #[serde(default)]
    pub min: f64,
    /// Desired number of support levels
    #[serde(default = "default_top")]
    pub top: usize,
    /// Disable dip/pip relaxation
    #[serde(default)]
    pub strict: bool,
    /// Use the exchange test environment
    #[serde(default)]
    pub sandbox: bool,
}

impl MarketConfig {
    /// Validate market configuration rules
    pub fn validate(&self) -> Result<(), AppError> {
        // Rule: symbol cannot be empty
        if self.symbol.trim().is_empty() {
            return Err(AppError::Config(format!(
                "Market on {}: symbol cannot be empty",
                self.exchange
            )));
        }

        let label = self.label();

        // Rule: every number must be finite
        for (name, value) in [("dip", self.dip), ("pip", self.pip), ("max", self.max), ("min", self.min)] {
            if !value.is_finite() {
                return Err(AppError::Config(format!(
                    "Market '{}': {} must be a finite number (got {})",
                    label, name, value
                )));
            }
        }

        // Rule: 0 <= dip < 100
        if self.dip < 0.0 || self.dip >= 100.0 {
            return Err(AppError::Config(format!(
                "Market '{}': dip must be >= 0 and < 100 (got {})",
                label, self.dip
            )));
        }

        // Rule: dip < pip <= 100
        if self.pip <= self.dip || self.pip > 100.0 {
            return Err(AppError::Config(format!(
                "Market '{}': pip must be > dip ({}) and <= 100 (got {})",
                label, self.dip, self.pip
            )));
        }

        // Rule: absolute bounds are non-negative
        if self.max < 0.0 {
            return Err(AppError::Config(format!(
                "Market '{}': max must be >= 0, got {}",
                label, self.max
            )));
        }
        if self.min < 0.0 {
            return Err(AppError::Config(format!(
                "Market '{}': min must be >= 0, got {}",
                label, self.min
            )));
        }

        // Rule: min <= max when both are set
        if self.min > 0.0 && self.max > 0.0 && self.min > self.max {
            return Err(AppError::Config(format!(
                "Market '{}': min ({}) must be <= max ({})",
                label, self.min, self.max
            )));
        }

        // Rule: Kraken has no public test environment
        if self.sandbox && self.exchange == Exchange::Kraken {
            return Err(AppError::Config(format!(
                "Market '{}': sandbox is not available on kraken",
                label
            )));
        }

        Ok(())
    }

    /// `exchange:symbol`, used in logs and error messages
    pub fn label(&self) -> String {
        format!("{}:{}", self.exchange, self.symbol)
    }

    pub fn tolerance(&self) -> ToleranceParams {
        ToleranceParams::new(self.dip, self.pip, self.max, self.min)
    }

    /// Search input for this market
    pub fn query(&self) -> SupportQuery {
        SupportQuery::new(self.symbol.clone(), self.tolerance(), self.top).strict(self.strict)
    }
}

/// Root configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Markets searched in order
    pub markets: Vec<MarketConfig>,
}

impl AppConfig {
    /// Validate all configuration rules
    pub fn validate(&self) -> Result<(), AppError> {
        // Rule: At least one market must be configured
        if self.markets.is_empty() {
            return Err(AppError::Config(
                "Configuration must contain at least one market".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for market in &self.markets {
            market.validate()?;

            // Rule: no duplicate (exchange, symbol)
            if !seen.insert((market.exchange, market.symbol.as_str())) {
                return Err(AppError::Config(format!(
                    "Market '{}' is configured more than once",
                    market.label()
                )));
            }
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
