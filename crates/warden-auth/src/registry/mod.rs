//! The token whitelist.
//!
//! A token is honored only while its record here is `Active`. Two
//! implementations are provided:
//! - PostgreSQL (the durable store used in production)
//! - In-memory (single-node deployments and tests)

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use warden_core::result::AppResult;
use warden_core::types::{OwnerId, TokenId};
use warden_entity::token::{NewRegisteredToken, RegisteredToken, RegistryStats};

pub use memory::MemoryTokenRegistry;
pub use postgres::PgTokenRegistry;

/// Storage handle for registered tokens.
///
/// Implementations must never move a record from `Invalidated` back to
/// `Active`, and `invalidate` must report `true` to exactly one caller
/// when several race on the same record.
#[async_trait]
pub trait TokenRegistry: Send + Sync + 'static {
    /// Insert a new `Active` record. Fails with a conflict on a duplicate id.
    async fn register(&self, token: NewRegisteredToken) -> AppResult<RegisteredToken>;

    /// Point lookup by token id.
    async fn find(&self, token_id: TokenId) -> AppResult<Option<RegisteredToken>>;

    /// Invalidate one record.
    ///
    /// Returns `true` if this call performed the transition, `false` if the
    /// record was absent or already invalidated.
    async fn invalidate(&self, token_id: TokenId) -> AppResult<bool>;

    /// Invalidate every active record of an owner, both kinds.
    async fn invalidate_all_for_owner(&self, owner_id: OwnerId) -> AppResult<u64>;

    /// Invalidate every active record of an owner except `keep`.
    async fn invalidate_all_for_owner_except(
        &self,
        owner_id: OwnerId,
        keep: TokenId,
    ) -> AppResult<u64>;

    /// Active records of an owner, newest first.
    async fn active_for_owner(&self, owner_id: OwnerId) -> AppResult<Vec<RegisteredToken>>;

    /// Every record of an owner in any state, newest first.
    async fn all_for_owner(&self, owner_id: OwnerId) -> AppResult<Vec<RegisteredToken>>;

    /// Delete records whose expiry is before `now`. Returns the count removed.
    async fn purge_expired(&self, now: DateTime<Utc>) -> AppResult<u64>;

    /// Registry-wide counters evaluated at `now`.
    async fn stats(&self, now: DateTime<Utc>) -> AppResult<RegistryStats>;

    /// Check that the backing store is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
