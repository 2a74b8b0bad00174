//! Partyline server entry point.
//!
//! Loads `partyline-config.yaml` (or the file named by `PARTYLINE_CONFIG`),
//! initializes logging, builds the turn engine, and serves the turn API.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use partyline_core::PartylineConfig;
use partyline_server::{AppState, start_server};

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, template loading, or the server
/// fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = PartylineConfig::load()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);
    if config.logging.json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    info!(
        bind = %config.server.bind_addr(),
        turn_log = %config.logging.turn_log_path.display(),
        seed = ?config.randomness.seed,
        templates_dir = ?config.templates_dir,
        "partyline-server starting"
    );

    let state = Arc::new(AppState::from_config(&config)?);
    start_server(&config.server, state).await?;
    Ok(())
}
