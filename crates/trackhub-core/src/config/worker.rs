//! Background worker configuration.

use serde::{Deserialize, Serialize};

/// Scheduled maintenance configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the scheduler runs inside the server.
    #[serde(default)]
    pub enabled: bool,
    /// Six-field cron expression for periodic folder index rebuilds.
    #[serde(default = "default_rebuild_cron")]
    pub rebuild_cron: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            rebuild_cron: default_rebuild_cron(),
        }
    }
}

fn default_rebuild_cron() -> String {
    "0 0 */6 * * *".to_string()
}
