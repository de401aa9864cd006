//! Owner management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use warden_auth::PasswordHasher;
use warden_core::error::AppError;
use warden_core::types::OwnerId;
use warden_database::RegistryPool;
use warden_database::repositories::OwnerRepository;
use warden_entity::owner::{CreateOwner, Owner, OwnerStatus};

/// Arguments for owner commands
#[derive(Debug, Args)]
pub struct OwnerArgs {
    /// Owner subcommand
    #[command(subcommand)]
    pub command: OwnerCommand,
}

/// Owner subcommands
#[derive(Debug, Subcommand)]
pub enum OwnerCommand {
    /// Create an owner account
    Create {
        /// Login email
        #[arg(long)]
        email: String,
        /// Password (prompted when omitted)
        #[arg(long)]
        password: Option<String>,
        /// Create the account suspended
        #[arg(long)]
        suspended: bool,
    },
    /// List all owners
    List,
    /// Suspend an owner and revoke every token they hold
    Suspend {
        /// Owner ID
        id: OwnerId,
    },
    /// Reactivate a suspended owner
    Activate {
        /// Owner ID
        id: OwnerId,
    },
}

/// Owner display row for table output
#[derive(Debug, Serialize, Tabled)]
struct OwnerRow {
    /// Owner ID
    id: i64,
    /// Email
    email: String,
    /// Status
    status: String,
    /// Created at
    created_at: String,
}

impl From<&Owner> for OwnerRow {
    fn from(owner: &Owner) -> Self {
        Self {
            id: owner.id.value(),
            email: owner.email.clone(),
            status: owner.status.to_string(),
            created_at: owner.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Execute owner commands
pub async fn execute(
    args: &OwnerArgs,
    pool: &RegistryPool,
    format: OutputFormat,
) -> Result<(), AppError> {
    let owner_repo = OwnerRepository::new(pool.pool().clone());

    match &args.command {
        OwnerCommand::Create {
            email,
            password,
            suspended,
        } => {
            let password = match password {
                Some(p) => p.clone(),
                None => dialoguer::Password::new()
                    .with_prompt("Password")
                    .with_confirmation("Confirm password", "Passwords do not match")
                    .interact()
                    .map_err(|e| AppError::internal(format!("Input error: {}", e)))?,
            };
            if password.is_empty() {
                return Err(AppError::validation("Password must not be empty"));
            }

            let password_hash = PasswordHasher::new().hash_password(&password)?;
            let status = if *suspended {
                OwnerStatus::Suspended
            } else {
                OwnerStatus::Active
            };

            let owner = owner_repo
                .create(&CreateOwner {
                    email: email.trim().to_string(),
                    password_hash,
                    status,
                })
                .await?;

            output::print_row(OwnerRow::from(&owner), format);
        }
        OwnerCommand::List => {
            let owners = owner_repo.find_all().await?;
            let rows: Vec<OwnerRow> = owners.iter().map(OwnerRow::from).collect();
            output::print_list(&rows, format);
        }
        OwnerCommand::Suspend { id } => {
            if !owner_repo.update_status(*id, OwnerStatus::Suspended).await? {
                return Err(AppError::not_found(format!("Owner {} not found", id)));
            }

            let revoked = super::token_registry(pool)
                .invalidate_all_for_owner(*id)
                .await?;

            output::print_success(&format!(
                "Owner {} suspended, {} token(s) revoked",
                id, revoked
            ));
        }
        OwnerCommand::Activate { id } => {
            if !owner_repo.update_status(*id, OwnerStatus::Active).await? {
                return Err(AppError::not_found(format!("Owner {} not found", id)));
            }
            output::print_success(&format!("Owner {} activated", id));
        }
    }

    Ok(())
}
