//! Owner collaborators consumed by the token authority.
//!
//! The core never hashes or compares passwords itself; it only asks a
//! [`CredentialVerifier`] at login and an [`OwnerDirectory`] at refresh.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use warden_core::result::AppResult;
use warden_core::types::OwnerId;
use warden_entity::owner::Owner;

pub use memory::MemoryOwnerDirectory;
pub use postgres::PgOwnerDirectory;

/// Checks login credentials.
#[async_trait]
pub trait CredentialVerifier: Send + Sync + 'static {
    /// Returns the owner when `secret` matches `identifier`, `None` otherwise.
    async fn verify(&self, identifier: &str, secret: &str) -> AppResult<Option<Owner>>;
}

/// Resolves the current record of an owner.
#[async_trait]
pub trait OwnerDirectory: Send + Sync + 'static {
    /// Returns the owner, or `None` if it no longer exists.
    async fn find(&self, owner_id: OwnerId) -> AppResult<Option<Owner>>;
}
