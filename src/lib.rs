pub mod api;
pub mod auth;
pub mod config;
pub mod core_state;
pub mod db;
pub mod error;
pub mod models;
pub mod recording;
pub mod reports;
pub mod session;
pub mod timeline;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::config::ClinicConfig;
use crate::core_state::ClinicState;

pub async fn run() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = match ClinicConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let state = match ClinicState::open(&config) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            tracing::error!(path = %config.database_path.display(), "Cannot open database: {e}");
            std::process::exit(1);
        }
    };

    let server = match api::server::start_api_server(state, config.bind_addr).await {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    };
    tracing::info!(addr = %server.info.server_addr, "Listening");

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
    server.stop().await;
}
