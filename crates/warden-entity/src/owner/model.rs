//! Owner entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use warden_core::types::OwnerId;

use super::OwnerStatus;

/// A registered account that tokens are issued for.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Owner {
    /// Unique owner identifier.
    pub id: OwnerId,
    /// Login identifier, unique case-insensitively.
    pub email: String,
    /// Argon2id password hash (never serialized to clients).
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Account status.
    pub status: OwnerStatus,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOwner {
    /// Login identifier.
    pub email: String,
    /// Pre-computed password hash.
    pub password_hash: String,
    /// Initial status.
    pub status: OwnerStatus,
}
