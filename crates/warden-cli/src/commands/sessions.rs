//! Session listing and revocation commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use warden_auth::SessionManager;
use warden_core::error::AppError;
use warden_core::result::AppResult;
use warden_core::types::{OwnerId, TokenId};
use warden_database::RegistryPool;
use warden_entity::session::SessionSummary;

/// Arguments for session commands
#[derive(Debug, Args)]
pub struct SessionsArgs {
    /// Session subcommand
    #[command(subcommand)]
    pub command: SessionsCommand,
}

/// Session subcommands
#[derive(Debug, Subcommand)]
pub enum SessionsCommand {
    /// List an owner's live sessions
    List {
        /// Owner ID
        owner_id: OwnerId,
    },
    /// Revoke a single token
    Revoke {
        /// Token ID
        token_id: TokenId,
    },
    /// Revoke every token of an owner
    RevokeAll {
        /// Owner ID
        owner_id: OwnerId,
        /// Skip confirmation
        #[arg(long)]
        force: bool,
    },
    /// Revoke every token of an owner except one
    RevokeOthers {
        /// Owner ID
        owner_id: OwnerId,
        /// Token to keep
        #[arg(long)]
        keep: TokenId,
    },
}

/// Live session row
#[derive(Debug, Serialize, Tabled)]
struct SessionRow {
    /// Session ID
    session_id: String,
    /// Device
    device: String,
    /// Address
    address: String,
    /// Issued at
    issued_at: String,
    /// Expires at
    expires_at: String,
}

impl From<&SessionSummary> for SessionRow {
    fn from(session: &SessionSummary) -> Self {
        Self {
            session_id: session.session_id.to_string(),
            device: output::or_dash(session.device_label.as_deref()),
            address: output::or_dash(session.origin_address.as_deref()),
            issued_at: session.issued_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            expires_at: session.expires_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

async fn session_rows(sessions: &SessionManager, owner_id: OwnerId) -> AppResult<Vec<SessionRow>> {
    let live = sessions.list_active_sessions(owner_id).await?;
    Ok(live.iter().map(SessionRow::from).collect())
}

/// Execute session commands
pub async fn execute(
    args: &SessionsArgs,
    pool: &RegistryPool,
    format: OutputFormat,
) -> Result<(), AppError> {
    let sessions = SessionManager::new(super::token_registry(pool));

    match &args.command {
        SessionsCommand::List { owner_id } => {
            let rows = session_rows(&sessions, *owner_id).await?;
            output::print_list(&rows, format);
        }
        SessionsCommand::Revoke { token_id } => {
            let outcome = sessions.logout(*token_id).await?;
            if outcome.invalidated {
                output::print_success(&format!("Token {} revoked", token_id));
            } else {
                output::print_warning(&format!("Token {} was not active", token_id));
            }
        }
        SessionsCommand::RevokeAll { owner_id, force } => {
            if !force {
                let confirm = dialoguer::Confirm::new()
                    .with_prompt(format!("Revoke ALL tokens of owner {}?", owner_id))
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {}", e)))?;

                if !confirm {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            let count = sessions.logout_all(*owner_id).await?;
            output::print_success(&format!("Revoked {} token(s)", count));
        }
        SessionsCommand::RevokeOthers { owner_id, keep } => {
            let count = sessions.logout_others(*owner_id, *keep).await?;
            output::print_success(&format!(
                "Revoked {} token(s), kept {}",
                count, keep
            ));
        }
    }

    Ok(())
}
