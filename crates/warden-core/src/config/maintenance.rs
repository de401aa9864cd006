//! Registry housekeeping configuration.

use serde::{Deserialize, Serialize};

/// Schedule for the expired-token sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceConfig {
    /// Whether the periodic sweep runs inside the server process.
    #[serde(default = "default_true")]
    pub registry_sweep_enabled: bool,
    /// Six-field cron expression (seconds first).
    #[serde(default = "default_sweep_cron")]
    pub registry_sweep_cron: String,
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        Self {
            registry_sweep_enabled: default_true(),
            registry_sweep_cron: default_sweep_cron(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_sweep_cron() -> String {
    "0 */30 * * * *".to_string()
}
