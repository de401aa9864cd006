//! Warden server: token registry and session authority.
//!
//! Main entry point that wires all crates together and starts the server.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing;
use tracing_subscriber::{EnvFilter, fmt};

use warden_api::AppState;
use warden_auth::{AuthService, PasswordHasher, PgOwnerDirectory, PgTokenRegistry, RegistryCleanup};
use warden_core::config::AppConfig;
use warden_core::error::AppError;
use warden_database::RegistryPool;
use warden_database::repositories::{OwnerRepository, TokenRepository};
use warden_worker::CronScheduler;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let config_path =
        std::env::var("WARDEN_CONFIG").unwrap_or_else(|_| "config/default".to_string());
    AppConfig::load(&config_path)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Warden v{}", env!("CARGO_PKG_VERSION"));

    // ── Database connection + migrations ─────────────────────────
    tracing::info!("Connecting to database...");
    let db_pool = RegistryPool::connect(&config.database).await?;

    db_pool.migrate().await?;

    // ── Registry + owner directory ───────────────────────────────
    let token_repo = Arc::new(TokenRepository::new(db_pool.pool().clone()));
    let owner_repo = Arc::new(OwnerRepository::new(db_pool.pool().clone()));

    let registry = Arc::new(PgTokenRegistry::new(token_repo));
    let directory = Arc::new(PgOwnerDirectory::new(owner_repo, PasswordHasher::new()));

    let auth = Arc::new(AuthService::new(
        &config.auth,
        registry.clone(),
        directory.clone(),
        directory,
    ));
    tracing::info!(
        access_ttl_minutes = config.auth.access_ttl_minutes,
        refresh_ttl_hours = config.auth.refresh_ttl_hours,
        "Token authority initialized"
    );

    // ── Registry sweep ───────────────────────────────────────────
    let mut scheduler = CronScheduler::new(RegistryCleanup::new(registry)).await?;
    scheduler.register_tasks(&config.maintenance).await?;
    scheduler.start().await?;

    // ── HTTP server ──────────────────────────────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = warden_api::build_router(AppState::new(Arc::new(config), auth));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Warden server listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
    })
    .await
    .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    // ── Teardown ─────────────────────────────────────────────────
    if let Err(e) = scheduler.shutdown().await {
        tracing::warn!("Scheduler shutdown failed: {}", e);
    }
    db_pool.close().await;

    tracing::info!("Warden server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
