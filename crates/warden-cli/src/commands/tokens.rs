//! Token registry inspection and housekeeping commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use warden_auth::{RegistryCleanup, TokenRegistry};
use warden_core::error::AppError;
use warden_core::result::AppResult;
use warden_core::types::{OwnerId, TokenId};
use warden_database::RegistryPool;
use warden_entity::token::RegisteredToken;

/// Arguments for token commands
#[derive(Debug, Args)]
pub struct TokensArgs {
    /// Token subcommand
    #[command(subcommand)]
    pub command: TokensCommand,
}

/// Token subcommands
#[derive(Debug, Subcommand)]
pub enum TokensCommand {
    /// Show registry counters
    Stats,
    /// List an owner's registry records
    List {
        /// Owner ID
        owner_id: OwnerId,
        /// Include invalidated records
        #[arg(long)]
        all: bool,
    },
    /// Show one registry record
    Show {
        /// Token ID (the `jti` claim)
        token_id: TokenId,
    },
    /// Delete records past their expiry
    Purge,
}

/// Registry counter row
#[derive(Debug, Serialize, Tabled)]
struct StatsRow {
    /// Active
    active: i64,
    /// Invalidated
    invalidated: i64,
    /// Expired
    expired: i64,
}

/// Registry record row
#[derive(Debug, Serialize, Tabled)]
struct TokenRow {
    /// Token ID
    token_id: String,
    /// Owner ID
    owner_id: i64,
    /// Kind
    kind: String,
    /// State
    state: String,
    /// Device
    device: String,
    /// Address
    address: String,
    /// Issued at
    issued_at: String,
    /// Expires at
    expires_at: String,
}

impl From<&RegisteredToken> for TokenRow {
    fn from(record: &RegisteredToken) -> Self {
        Self {
            token_id: record.token_id.to_string(),
            owner_id: record.owner_id.value(),
            kind: record.kind.to_string(),
            state: record.state.to_string(),
            device: output::or_dash(record.device_label.as_deref()),
            address: output::or_dash(record.origin_address.as_deref()),
            issued_at: record.issued_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            expires_at: record.expires_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

/// Records of `owner_id`, newest first. Without `all`, only active ones.
async fn owner_token_rows(
    registry: &dyn TokenRegistry,
    owner_id: OwnerId,
    all: bool,
) -> AppResult<Vec<TokenRow>> {
    let records = if all {
        registry.all_for_owner(owner_id).await?
    } else {
        registry.active_for_owner(owner_id).await?
    };
    Ok(records.iter().map(TokenRow::from).collect())
}

/// Execute token commands
pub async fn execute(
    args: &TokensArgs,
    pool: &RegistryPool,
    format: OutputFormat,
) -> Result<(), AppError> {
    let registry = super::token_registry(pool);

    match &args.command {
        TokensCommand::Stats => {
            let stats = RegistryCleanup::new(registry).stats().await?;
            output::print_row(
                StatsRow {
                    active: stats.active,
                    invalidated: stats.invalidated,
                    expired: stats.expired,
                },
                format,
            );
        }
        TokensCommand::List { owner_id, all } => {
            let rows = owner_token_rows(registry.as_ref(), *owner_id, *all).await?;
            output::print_list(&rows, format);
        }
        TokensCommand::Show { token_id } => {
            let record = registry
                .find(*token_id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Token {} not found", token_id)))?;
            output::print_row(TokenRow::from(&record), format);
        }
        TokensCommand::Purge => {
            let removed = RegistryCleanup::new(registry).run_cleanup().await?;
            output::print_success(&format!("Purged {} expired record(s)", removed));
        }
    }

    Ok(())
}
