//! TrackHub server: hierarchical path index and navigator.
//!
//! Loads settings, installs the log subscriber, opens the configured
//! stores and serves the HTTP API until interrupted.

use tracing_subscriber::{EnvFilter, fmt};

use trackhub_core::config::AppConfig;
use trackhub_core::error::AppError;
use trackhub_database::Stores;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// `TRACKHUB_CONFIG` names the base file, `TRACKHUB_ENV` the overlay.
fn load_configuration() -> Result<AppConfig, AppError> {
    let config_path =
        std::env::var("TRACKHUB_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());
    let env = std::env::var("TRACKHUB_ENV").unwrap_or_else(|_| "development".to_string());

    AppConfig::load(&config_path, &env)
}

fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    if config.logging.is_json() {
        fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt().pretty().with_env_filter(filter).with_target(true).init();
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        provider = ?config.database.provider,
        policy = ?config.navigator.mixed_content,
        "Opening stores"
    );
    let stores = Stores::connect(&config.database).await?;
    trackhub_api::run_server(config, stores).await
}
