//! NoteVault server.
//!
//! Main entry point: loads configuration, initializes tracing, and hands
//! over to the API crate's server runner.

use tracing_subscriber::{EnvFilter, fmt};

use notevault_core::config::{AppConfig, LogFormat};
use notevault_core::error::{AppError, ErrorKind};

#[tokio::main]
async fn main() {
    let env = std::env::var("NOTEVAULT_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match load_configuration(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, backend = ?config.database.backend, "Configuration loaded");

    if let Err(e) = notevault_api::run_server(config).await {
        match e.kind {
            ErrorKind::Configuration => tracing::error!(error = %e, "Refusing to start"),
            _ => tracing::error!(error = %e, "Server error"),
        }
        std::process::exit(1);
    }
}

/// Load configuration from `NOTEVAULT_CONFIG` (default `config/default`),
/// the environment overlay, and `NOTEVAULT__*` variables.
fn load_configuration(env: &str) -> Result<AppConfig, AppError> {
    match std::env::var("NOTEVAULT_CONFIG") {
        Ok(base) => AppConfig::load_from(&base, env),
        Err(_) => AppConfig::load(env),
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        LogFormat::Pretty => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}
