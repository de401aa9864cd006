//! Cron scheduler for registry maintenance.

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};
use tracing;

use warden_auth::RegistryCleanup;
use warden_core::config::MaintenanceConfig;
use warden_core::error::AppError;

/// Cron-based scheduler for periodic background tasks
pub struct CronScheduler {
    /// The underlying job scheduler
    scheduler: JobScheduler,
    /// Sweep handler
    cleanup: RegistryCleanup,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler").finish()
    }
}

impl CronScheduler {
    /// Create a new cron scheduler
    pub async fn new(cleanup: RegistryCleanup) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {}", e)))?;

        Ok(Self { scheduler, cleanup })
    }

    /// Register every task enabled in `config`
    pub async fn register_tasks(&self, config: &MaintenanceConfig) -> Result<(), AppError> {
        if config.registry_sweep_enabled {
            self.register_registry_sweep(&config.registry_sweep_cron)
                .await?;
        } else {
            tracing::info!("Registry sweep disabled");
        }
        Ok(())
    }

    /// Start the scheduler
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {}", e)))?;

        tracing::info!("Cron scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {}", e)))?;

        tracing::info!("Cron scheduler shut down");
        Ok(())
    }

    /// Expired registry record sweep
    async fn register_registry_sweep(&self, schedule: &str) -> Result<(), AppError> {
        let cleanup = self.cleanup.clone();
        let job = CronJob::new_async(schedule, move |_uuid, _lock| {
            let cleanup = cleanup.clone();
            Box::pin(async move {
                tracing::debug!("Running registry sweep");
                if let Err(e) = cleanup.run_cleanup().await {
                    tracing::error!(error = %e, "Registry sweep failed");
                }
            })
        })
        .map_err(|e| {
            AppError::configuration(format!(
                "Invalid registry sweep schedule '{}': {}",
                schedule, e
            ))
        })?;

        self.scheduler.add(job).await.map_err(|e| {
            AppError::internal(format!("Failed to add registry_sweep schedule: {}", e))
        })?;

        tracing::info!(schedule, "Registered: registry_sweep");
        Ok(())
    }
}
