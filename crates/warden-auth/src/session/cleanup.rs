//! Expired registry record cleanup.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use warden_core::result::AppResult;
use warden_entity::token::RegistryStats;

use crate::registry::TokenRegistry;

/// Removes records whose expiry has passed.
///
/// Purely storage hygiene: validity never depends on this running.
#[derive(Clone)]
pub struct RegistryCleanup {
    registry: Arc<dyn TokenRegistry>,
}

impl std::fmt::Debug for RegistryCleanup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryCleanup").finish()
    }
}

impl RegistryCleanup {
    /// Creates a new cleanup handler.
    pub fn new(registry: Arc<dyn TokenRegistry>) -> Self {
        Self { registry }
    }

    /// Runs one sweep. Returns the number of records removed.
    pub async fn run_cleanup(&self) -> AppResult<u64> {
        let removed = self.registry.purge_expired(Utc::now()).await?;
        if removed > 0 {
            info!(removed, "Purged expired registry records");
        }
        Ok(removed)
    }

    /// Current registry counters.
    pub async fn stats(&self) -> AppResult<RegistryStats> {
        self.registry.stats(Utc::now()).await
    }
}
