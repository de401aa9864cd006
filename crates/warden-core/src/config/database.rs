//! Registry store connection settings.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// PostgreSQL pool settings, sized for one indexed registry lookup per
/// authenticated request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL.
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Connections kept open while idle.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// How long a request waits for a free connection, in milliseconds.
    #[serde(default = "default_acquire_timeout_ms")]
    pub acquire_timeout_ms: u64,
    /// Server-side `statement_timeout` applied to every pooled session, in
    /// milliseconds. Zero leaves the server default in place.
    #[serde(default = "default_statement_timeout_ms")]
    pub statement_timeout_ms: u64,
    /// Connections older than this are recycled, in seconds.
    #[serde(default = "default_max_lifetime_seconds")]
    pub max_lifetime_seconds: u64,
}

impl DatabaseConfig {
    /// Reject pool bounds that cannot be satisfied.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.url.trim().is_empty() {
            return Err(AppError::configuration("database.url must not be empty"));
        }
        if self.max_connections == 0 {
            return Err(AppError::configuration(
                "database.max_connections must be at least 1",
            ));
        }
        if self.min_connections > self.max_connections {
            return Err(AppError::configuration(format!(
                "database.min_connections ({}) exceeds max_connections ({})",
                self.min_connections, self.max_connections
            )));
        }
        if self.acquire_timeout_ms == 0 {
            return Err(AppError::configuration(
                "database.acquire_timeout_ms must be positive",
            ));
        }
        Ok(())
    }
}

fn default_max_connections() -> u32 {
    16
}

fn default_min_connections() -> u32 {
    2
}

fn default_acquire_timeout_ms() -> u64 {
    2_000
}

fn default_statement_timeout_ms() -> u64 {
    3_000
}

fn default_max_lifetime_seconds() -> u64 {
    1_800
}
