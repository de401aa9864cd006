//! PostgreSQL-backed token registry.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use warden_core::result::AppResult;
use warden_core::types::{OwnerId, TokenId};
use warden_database::repositories::TokenRepository;
use warden_entity::token::{NewRegisteredToken, RegisteredToken, RegistryStats};

use super::TokenRegistry;

/// Token registry stored in the `token_registry` table.
#[derive(Debug, Clone)]
pub struct PgTokenRegistry {
    repo: Arc<TokenRepository>,
}

impl PgTokenRegistry {
    /// Creates a registry over an existing repository.
    pub fn new(repo: Arc<TokenRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl TokenRegistry for PgTokenRegistry {
    async fn register(&self, token: NewRegisteredToken) -> AppResult<RegisteredToken> {
        self.repo.insert(&token).await
    }

    async fn find(&self, token_id: TokenId) -> AppResult<Option<RegisteredToken>> {
        self.repo.find_by_token_id(token_id).await
    }

    async fn invalidate(&self, token_id: TokenId) -> AppResult<bool> {
        self.repo.invalidate(token_id).await
    }

    async fn invalidate_all_for_owner(&self, owner_id: OwnerId) -> AppResult<u64> {
        self.repo.invalidate_all_by_owner(owner_id).await
    }

    async fn invalidate_all_for_owner_except(
        &self,
        owner_id: OwnerId,
        keep: TokenId,
    ) -> AppResult<u64> {
        self.repo.invalidate_all_by_owner_except(owner_id, keep).await
    }

    async fn active_for_owner(&self, owner_id: OwnerId) -> AppResult<Vec<RegisteredToken>> {
        self.repo.find_active_by_owner(owner_id).await
    }

    async fn all_for_owner(&self, owner_id: OwnerId) -> AppResult<Vec<RegisteredToken>> {
        self.repo.find_all_by_owner(owner_id).await
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        self.repo.delete_expired(now).await
    }

    async fn stats(&self, now: DateTime<Utc>) -> AppResult<RegistryStats> {
        self.repo.stats(now).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.repo.health_check().await
    }
}
