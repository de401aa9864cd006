//! CLI command definitions and dispatch.

pub mod migrate;
pub mod owner;
pub mod sessions;
pub mod tokens;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use warden_auth::{PgTokenRegistry, TokenRegistry};
use warden_core::config::AppConfig;
use warden_core::error::AppError;
use warden_database::RegistryPool;
use warden_database::repositories::TokenRepository;

/// Warden: token registry and session administration
#[derive(Debug, Parser)]
#[command(name = "warden-cli", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run pending database migrations
    Migrate,
    /// Owner account management
    Owner(owner::OwnerArgs),
    /// Token registry inspection and housekeeping
    Tokens(tokens::TokensArgs),
    /// Session listing and revocation
    Sessions(sessions::SessionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = AppConfig::load(&self.config)?;
        let pool = RegistryPool::connect(&config.database).await?;

        let result = match &self.command {
            Commands::Migrate => migrate::execute(&pool).await,
            Commands::Owner(args) => owner::execute(args, &pool, self.format).await,
            Commands::Tokens(args) => tokens::execute(args, &pool, self.format).await,
            Commands::Sessions(args) => sessions::execute(args, &pool, self.format).await,
        };

        pool.close().await;
        result
    }
}

/// Helper: PostgreSQL-backed registry over `pool`
pub(crate) fn token_registry(pool: &RegistryPool) -> Arc<dyn TokenRegistry> {
    Arc::new(PgTokenRegistry::new(Arc::new(TokenRepository::new(
        pool.pool().clone(),
    ))))
}
