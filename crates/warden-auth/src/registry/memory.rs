//! In-memory token registry using `tokio::sync::RwLock`.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use warden_core::error::AppError;
use warden_core::result::AppResult;
use warden_core::types::{OwnerId, TokenId};
use warden_entity::token::{NewRegisteredToken, RegisteredToken, RegistryStats, TokenState};

use super::TokenRegistry;

#[derive(Debug, Default)]
struct Inner {
    records: HashMap<TokenId, Entry>,
    next_seq: u64,
}

#[derive(Debug)]
struct Entry {
    seq: u64,
    record: RegisteredToken,
}

impl Inner {
    /// Records of one owner matching `filter`, newest first.
    fn for_owner(
        &self,
        owner_id: OwnerId,
        filter: impl Fn(&RegisteredToken) -> bool,
    ) -> Vec<RegisteredToken> {
        let mut entries: Vec<&Entry> = self
            .records
            .values()
            .filter(|e| e.record.owner_id == owner_id && filter(&e.record))
            .collect();
        entries.sort_by(|a, b| {
            b.record
                .issued_at
                .cmp(&a.record.issued_at)
                .then(b.seq.cmp(&a.seq))
        });
        entries.into_iter().map(|e| e.record.clone()).collect()
    }

    fn invalidate_where(&mut self, predicate: impl Fn(&RegisteredToken) -> bool) -> u64 {
        let now = Utc::now();
        let mut count = 0;
        for entry in self.records.values_mut() {
            let record = &mut entry.record;
            if record.state == TokenState::Active && predicate(record) {
                record.state = TokenState::Invalidated;
                record.invalidated_at = Some(now);
                count += 1;
            }
        }
        count
    }
}

/// Token registry kept in process memory.
///
/// Records do not survive a restart, which fails closed: every previously
/// issued token stops validating.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenRegistry {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryTokenRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records in any state.
    pub async fn len(&self) -> usize {
        self.inner.read().await.records.len()
    }

    /// Whether the registry holds no records.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.records.is_empty()
    }
}

#[async_trait]
impl TokenRegistry for MemoryTokenRegistry {
    async fn register(&self, token: NewRegisteredToken) -> AppResult<RegisteredToken> {
        let mut inner = self.inner.write().await;
        if inner.records.contains_key(&token.token_id) {
            return Err(AppError::conflict(format!(
                "Token id {} is already registered",
                token.token_id
            )));
        }

        let record = token.into_active();
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.records.insert(
            record.token_id,
            Entry {
                seq,
                record: record.clone(),
            },
        );
        Ok(record)
    }

    async fn find(&self, token_id: TokenId) -> AppResult<Option<RegisteredToken>> {
        let inner = self.inner.read().await;
        Ok(inner.records.get(&token_id).map(|e| e.record.clone()))
    }

    async fn invalidate(&self, token_id: TokenId) -> AppResult<bool> {
        let mut inner = self.inner.write().await;
        Ok(inner.invalidate_where(|r| r.token_id == token_id) == 1)
    }

    async fn invalidate_all_for_owner(&self, owner_id: OwnerId) -> AppResult<u64> {
        let mut inner = self.inner.write().await;
        Ok(inner.invalidate_where(|r| r.owner_id == owner_id))
    }

    async fn invalidate_all_for_owner_except(
        &self,
        owner_id: OwnerId,
        keep: TokenId,
    ) -> AppResult<u64> {
        let mut inner = self.inner.write().await;
        Ok(inner.invalidate_where(|r| r.owner_id == owner_id && r.token_id != keep))
    }

    async fn active_for_owner(&self, owner_id: OwnerId) -> AppResult<Vec<RegisteredToken>> {
        let inner = self.inner.read().await;
        Ok(inner.for_owner(owner_id, |r| r.state == TokenState::Active))
    }

    async fn all_for_owner(&self, owner_id: OwnerId) -> AppResult<Vec<RegisteredToken>> {
        let inner = self.inner.read().await;
        Ok(inner.for_owner(owner_id, |_| true))
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let mut inner = self.inner.write().await;
        let before = inner.records.len();
        inner.records.retain(|_, e| e.record.expires_at >= now);
        Ok((before - inner.records.len()) as u64)
    }

    async fn stats(&self, now: DateTime<Utc>) -> AppResult<RegistryStats> {
        let inner = self.inner.read().await;
        let mut stats = RegistryStats::default();
        for entry in inner.records.values() {
            let record = &entry.record;
            match record.state {
                TokenState::Invalidated => stats.invalidated += 1,
                TokenState::Active if record.is_expired(now) => stats.expired += 1,
                TokenState::Active => stats.active += 1,
            }
        }
        Ok(stats)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
