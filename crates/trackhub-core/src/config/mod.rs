//! Settings for every TrackHub component.
//!
//! One sub-module per TOML section. Every field has a default, so a
//! missing file or a partial section still yields a usable [`AppConfig`].

pub mod database;
pub mod indexer;
pub mod logging;
pub mod navigator;
pub mod server;
pub mod worker;

use serde::{Deserialize, Serialize};

pub use self::server::{CorsConfig, ServerConfig};
pub use self::database::{DatabaseConfig, StoreProvider};
pub use self::indexer::IndexerConfig;
pub use self::logging::LoggingConfig;
pub use self::navigator::{MixedContentPolicyKind, NavigatorConfig};
pub use self::worker::WorkerConfig;

use crate::error::AppError;

/// All sections, loaded once at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Record and index store settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Folder index builder settings.
    #[serde(default)]
    pub indexer: IndexerConfig,
    /// Navigator and read-path settings.
    #[serde(default)]
    pub navigator: NavigatorConfig,
    /// Background worker settings.
    #[serde(default)]
    pub worker: WorkerConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Layer, from lowest to highest precedence: the base file at
    /// `config_path`, the overlay `config/{env}.toml`, then `TRACKHUB__*`
    /// variables (`TRACKHUB__INDEXER__UPSERT_CONCURRENCY=4`). Missing files
    /// are skipped.
    pub fn load(config_path: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("TRACKHUB")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Cannot merge settings sources: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Invalid settings: {e}")))
    }
}
