//! Support Finder - Entry Point
//!
//! 1. Loads configuration
//! 2. Builds a market-data adapter per configured market
//! 3. Runs the support granularity search
//! 4. Logs the support levels found
//!
//! Markets are processed one after another. Thin books are skipped; any
//! exchange failure makes the process exit non-zero.

use std::path::Path;
use tokio::signal;
use tracing::{error, info, warn};

use support_finder::adapters::create_market_data;
use support_finder::config::{self, constants, logging, MarketConfig};
use support_finder::core::{find_support_granularity, SupportSearch};
use support_finder::AppError;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if it exists)
    dotenvy::dotenv().ok();

    logging::init_logging();

    info!("🚀 Support finder starting...");
    constants::log_configuration();

    let config_path = constants::config_path();
    info!("📁 Loading configuration from {}...", config_path);
    let config = match config::load_config(Path::new(&config_path)) {
        Ok(cfg) => {
            let markets: Vec<String> = cfg.markets.iter().map(|m| m.label()).collect();
            info!("[CONFIG] Loaded markets: {:?}", markets);
            cfg
        }
        Err(e) => {
            error!("[ERROR] Configuration failed: {}", e);
            std::process::exit(1);
        }
    };

    let mut failures = 0usize;
    let mut thin = 0usize;

    for market in &config.markets {
        let outcome = tokio::select! {
            outcome = run_market(market) => outcome,
            _ = signal::ctrl_c() => {
                info!("[SHUTDOWN] Interrupted during {}", market.label());
                std::process::exit(130);
            }
        };

        match outcome {
            Ok(result) => {
                if let Err(e) = report(market, &result) {
                    error!(market = %market.label(), error = %e, "Failed to report result");
                    failures += 1;
                }
            }
            Err(e) if e.is_thin_book() => {
                warn!(market = %market.label(), error = %e, "Skipping market");
                thin += 1;
            }
            Err(e) => {
                error!(market = %market.label(), error = %e, "Support search failed");
                failures += 1;
            }
        }
    }

    info!(
        markets = config.markets.len(),
        thin,
        failures,
        "Support search complete"
    );

    if failures > 0 {
        std::process::exit(1);
    }
    Ok(())
}

/// Build the market's adapter and run the search
async fn run_market(market: &MarketConfig) -> Result<SupportSearch, AppError> {
    let source = create_market_data(&market.exchange, market.sandbox)?;
    let result = find_support_granularity(&source, &market.query()).await?;
    Ok(result)
}

fn report(market: &MarketConfig, result: &SupportSearch) -> Result<(), AppError> {
    let levels = serde_json::to_string(&result.display_levels())?;
    info!(
        market = %market.label(),
        granularity = result.granularity,
        dip = result.dip,
        pip = result.pip,
        relaxed = result.relaxed,
        attempts = result.attempts,
        levels = %levels,
        "📊 Support levels"
    );
    Ok(())
}
