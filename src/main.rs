//! SUREBET: cross-bookmaker sports arbitrage finder.
//!
//! Entry point. Loads configuration, initialises structured logging,
//! wires the odds client into the scanner, and serves the HTTP API
//! until Ctrl+C.

use anyhow::{Context, Result};
use secrecy::SecretString;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info, warn};

use surebet::api::{self, ServiceState};
use surebet::config::AppConfig;
use surebet::data::odds_api::OddsApiClient;
use surebet::data::sports::SportCatalog;
use surebet::engine::OddsScanner;

const BANNER: &str = r#"
  ____  _   _ ____  _____ ____  _____ _____
 / ___|| | | |  _ \| ____| __ )| ____|_   _|
 \___ \| | | | |_) |  _| |  _ \|  _|   | |
  ___) | |_| |  _ <| |___| |_) | |___  | |
 |____/ \___/|_| \_\_____|____/|_____| |_|

  Cross-bookmaker arbitrage finder v0.1.0
"#;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let config_path = std::env::var("SUREBET_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let (mut cfg, found) = AppConfig::load_or_default(&config_path)?;
    cfg.apply_env_overrides()?;

    init_logging();

    println!("{BANNER}");
    if !found {
        warn!(path = %config_path, "Config file not found, using defaults");
    }
    info!(
        host = %cfg.server.host,
        port = cfg.server.port,
        regions = %cfg.odds_api.regions,
        markets = %cfg.odds_api.markets,
        "SUREBET starting up"
    );

    // -- Initialise components -------------------------------------------

    let api_key = match AppConfig::resolve_env(&cfg.odds_api.api_key_env) {
        Ok(key) => key,
        Err(e) => {
            warn!(error = %e, "No odds API key configured, upstream requests will be rejected");
            String::new()
        }
    };

    let provider = OddsApiClient::new(SecretString::new(api_key), cfg.odds_api.clone())?;
    let catalog = SportCatalog::from_config(&cfg.sports);
    info!(sports = catalog.entries().len(), "Sport catalog loaded");

    let scanner = OddsScanner::new(
        Arc::new(provider),
        catalog,
        cfg.risk.clone(),
        cfg.odds_api.max_concurrent_fetches,
    );
    let state = Arc::new(ServiceState::new(scanner));

    // -- Serve -----------------------------------------------------------

    let addr: SocketAddr = format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", cfg.server.host, cfg.server.port))?;

    api::serve(state, addr, shutdown_signal()).await?;

    info!("SUREBET shut down cleanly.");
    Ok(())
}

/// Resolves on Ctrl+C.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received."),
        Err(e) => {
            error!(error = %e, "Failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}

/// Initialise the `tracing` subscriber.
fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("surebet=info,tower_http=info"));

    let json_logging = std::env::var("SUREBET_LOG_JSON").is_ok();

    if json_logging {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .init();
    }
}
