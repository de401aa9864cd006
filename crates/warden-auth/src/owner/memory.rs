//! In-memory owner directory.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use warden_core::error::AppError;
use warden_core::result::AppResult;
use warden_core::types::OwnerId;
use warden_entity::owner::{Owner, OwnerStatus};

use crate::password::PasswordHasher;

use super::{CredentialVerifier, OwnerDirectory};

#[derive(Debug, Default)]
struct Inner {
    owners: HashMap<OwnerId, Owner>,
}

/// Owner store kept in process memory, hashing passwords with Argon2id.
#[derive(Debug, Clone)]
pub struct MemoryOwnerDirectory {
    inner: Arc<RwLock<Inner>>,
    hasher: PasswordHasher,
}

impl MemoryOwnerDirectory {
    /// Creates an empty directory with the default hasher.
    pub fn new() -> Self {
        Self::with_hasher(PasswordHasher::new())
    }

    /// Creates an empty directory with a specific hasher.
    pub fn with_hasher(hasher: PasswordHasher) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner::default())),
            hasher,
        }
    }

    /// Adds an owner under a fixed id.
    pub async fn add_owner(
        &self,
        id: OwnerId,
        email: &str,
        password: &str,
        status: OwnerStatus,
    ) -> AppResult<Owner> {
        let password_hash = self.hasher.hash_password(password)?;
        let mut inner = self.inner.write().await;

        let taken = inner.owners.contains_key(&id)
            || inner
                .owners
                .values()
                .any(|o| o.email.eq_ignore_ascii_case(email));
        if taken {
            return Err(AppError::conflict(format!(
                "Owner {id} or email '{email}' already exists"
            )));
        }

        let owner = Owner {
            id,
            email: email.to_string(),
            password_hash,
            status,
            created_at: Utc::now(),
        };
        inner.owners.insert(id, owner.clone());
        Ok(owner)
    }

    /// Changes an owner's status. Returns `false` if the owner is unknown.
    pub async fn set_status(&self, id: OwnerId, status: OwnerStatus) -> bool {
        let mut inner = self.inner.write().await;
        match inner.owners.get_mut(&id) {
            Some(owner) => {
                owner.status = status;
                true
            }
            None => false,
        }
    }

    /// Removes an owner. Returns `false` if the owner is unknown.
    pub async fn remove(&self, id: OwnerId) -> bool {
        self.inner.write().await.owners.remove(&id).is_some()
    }
}

impl Default for MemoryOwnerDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialVerifier for MemoryOwnerDirectory {
    async fn verify(&self, identifier: &str, secret: &str) -> AppResult<Option<Owner>> {
        let owner = {
            let inner = self.inner.read().await;
            inner
                .owners
                .values()
                .find(|o| o.email.eq_ignore_ascii_case(identifier))
                .cloned()
        };

        let stored = owner.as_ref().map(|o| o.password_hash.as_str());
        if self.hasher.verify_or_decoy(secret, stored)? {
            Ok(owner)
        } else {
            Ok(None)
        }
    }
}

#[async_trait]
impl OwnerDirectory for MemoryOwnerDirectory {
    async fn find(&self, owner_id: OwnerId) -> AppResult<Option<Owner>> {
        Ok(self.inner.read().await.owners.get(&owner_id).cloned())
    }
}
