//! Fixtures shared by unit tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use warden_core::config::AuthConfig;
use warden_core::error::AppError;
use warden_core::result::AppResult;
use warden_core::types::{OwnerId, TokenId};
use warden_entity::owner::{Owner, OwnerStatus};
use warden_entity::token::{NewRegisteredToken, RegisteredToken, RegistryStats};

use crate::jwt::{JwtDecoder, JwtEncoder};
use crate::owner::MemoryOwnerDirectory;
use crate::password::PasswordHasher;
use crate::registry::{MemoryTokenRegistry, TokenRegistry};
use crate::session::{SessionAuthenticator, TokenIssuer};

pub fn auth_config() -> AuthConfig {
    AuthConfig {
        access_signing_key: "unit-access-key".to_string(),
        refresh_signing_key: "unit-refresh-key".to_string(),
        access_ttl_minutes: 15,
        refresh_ttl_hours: 168,
        leeway_seconds: 0,
        revoke_all_on_refresh_reuse: false,
    }
}

pub fn owner(id: i64) -> Owner {
    Owner {
        id: OwnerId(id),
        email: format!("owner{id}@example.com"),
        password_hash: String::new(),
        status: OwnerStatus::Active,
        created_at: Utc::now(),
    }
}

pub fn directory() -> MemoryOwnerDirectory {
    MemoryOwnerDirectory::with_hasher(PasswordHasher::with_params(1024, 1, 1).expect("params"))
}

pub fn issuer(config: &AuthConfig, registry: Arc<dyn TokenRegistry>) -> TokenIssuer {
    TokenIssuer::new(Arc::new(JwtEncoder::new(config)), registry)
}

pub fn authenticator(config: &AuthConfig, registry: Arc<dyn TokenRegistry>) -> SessionAuthenticator {
    SessionAuthenticator::new(Arc::new(JwtDecoder::new(config)), registry)
}

/// Wraps a memory registry with injectable faults.
#[derive(Default)]
pub struct FaultyRegistry {
    pub inner: MemoryTokenRegistry,
    /// 1-based index of the `register` call that fails (0 = never).
    pub fail_register_on: usize,
    /// Every `invalidate` call fails.
    pub fail_invalidate: bool,
    /// `invalidate` of this id behaves as if a concurrent caller won.
    pub lose_race_on: Option<TokenId>,
    register_calls: AtomicUsize,
}

impl FaultyRegistry {
    pub fn failing_register(n: usize) -> Self {
        Self {
            fail_register_on: n,
            ..Self::default()
        }
    }

    /// Shares `inner` and lets a concurrent caller win the invalidation of `token_id`.
    pub fn losing_race(inner: MemoryTokenRegistry, token_id: TokenId) -> Self {
        Self {
            inner,
            lose_race_on: Some(token_id),
            ..Self::default()
        }
    }

    /// Shares `inner` and fails every invalidation.
    pub fn failing_invalidate(inner: MemoryTokenRegistry) -> Self {
        Self {
            inner,
            fail_invalidate: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl TokenRegistry for FaultyRegistry {
    async fn register(&self, token: NewRegisteredToken) -> AppResult<RegisteredToken> {
        let call = self.register_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call == self.fail_register_on {
            return Err(AppError::database("connection reset"));
        }
        self.inner.register(token).await
    }

    async fn find(&self, token_id: TokenId) -> AppResult<Option<RegisteredToken>> {
        self.inner.find(token_id).await
    }

    async fn invalidate(&self, token_id: TokenId) -> AppResult<bool> {
        if self.fail_invalidate {
            return Err(AppError::database("connection reset"));
        }
        if self.lose_race_on == Some(token_id) {
            self.inner.invalidate(token_id).await?;
        }
        self.inner.invalidate(token_id).await
    }

    async fn invalidate_all_for_owner(&self, owner_id: OwnerId) -> AppResult<u64> {
        self.inner.invalidate_all_for_owner(owner_id).await
    }

    async fn invalidate_all_for_owner_except(
        &self,
        owner_id: OwnerId,
        keep: TokenId,
    ) -> AppResult<u64> {
        self.inner.invalidate_all_for_owner_except(owner_id, keep).await
    }

    async fn active_for_owner(&self, owner_id: OwnerId) -> AppResult<Vec<RegisteredToken>> {
        self.inner.active_for_owner(owner_id).await
    }

    async fn all_for_owner(&self, owner_id: OwnerId) -> AppResult<Vec<RegisteredToken>> {
        self.inner.all_for_owner(owner_id).await
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        self.inner.purge_expired(now).await
    }

    async fn stats(&self, now: DateTime<Utc>) -> AppResult<RegistryStats> {
        self.inner.stats(now).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
