//! Owner collaborators backed by the `owners` table.

use std::sync::Arc;

use async_trait::async_trait;

use warden_core::result::AppResult;
use warden_core::types::OwnerId;
use warden_database::repositories::OwnerRepository;
use warden_entity::owner::Owner;

use crate::password::PasswordHasher;

use super::{CredentialVerifier, OwnerDirectory};

/// Looks owners up in PostgreSQL and verifies Argon2id password hashes.
#[derive(Debug, Clone)]
pub struct PgOwnerDirectory {
    repo: Arc<OwnerRepository>,
    hasher: PasswordHasher,
}

impl PgOwnerDirectory {
    /// Creates a directory over an existing repository.
    pub fn new(repo: Arc<OwnerRepository>, hasher: PasswordHasher) -> Self {
        Self { repo, hasher }
    }
}

#[async_trait]
impl CredentialVerifier for PgOwnerDirectory {
    async fn verify(&self, identifier: &str, secret: &str) -> AppResult<Option<Owner>> {
        let owner = self.repo.find_by_email(identifier).await?;
        let stored = owner.as_ref().map(|o| o.password_hash.as_str());

        if self.hasher.verify_or_decoy(secret, stored)? {
            Ok(owner)
        } else {
            Ok(None)
        }
    }
}

#[async_trait]
impl OwnerDirectory for PgOwnerDirectory {
    async fn find(&self, owner_id: OwnerId) -> AppResult<Option<Owner>> {
        self.repo.find_by_id(owner_id).await
    }
}
