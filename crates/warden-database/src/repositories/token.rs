//! Token registry repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use warden_core::error::{AppError, ErrorKind};
use warden_core::result::AppResult;
use warden_core::types::{OwnerId, TokenId};
use warden_entity::token::{NewRegisteredToken, RegisteredToken, RegistryStats};

/// Repository over the `token_registry` table.
///
/// Every state change is a conditional update on `state = 'active'`, so
/// a record never leaves the `invalidated` state once it gets there.
#[derive(Debug, Clone)]
pub struct TokenRepository {
    pool: PgPool,
}

impl TokenRepository {
    /// Create a new token repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new active record.
    pub async fn insert(&self, data: &NewRegisteredToken) -> AppResult<RegisteredToken> {
        sqlx::query_as::<_, RegisteredToken>(
            "INSERT INTO token_registry (token_id, owner_id, kind, state, device_label, \
             origin_address, expires_at, issued_at) \
             VALUES ($1, $2, $3, 'active', $4, $5, $6, $7) RETURNING *",
        )
        .bind(data.token_id)
        .bind(data.owner_id)
        .bind(data.kind)
        .bind(&data.device_label)
        .bind(&data.origin_address)
        .bind(data.expires_at)
        .bind(data.issued_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => AppError::with_source(
                ErrorKind::Conflict,
                format!("Token id {} is already registered", data.token_id),
                e,
            ),
            other => AppError::with_source(ErrorKind::Database, "Failed to register token", other),
        })
    }

    /// Find a record by token id.
    pub async fn find_by_token_id(&self, token_id: TokenId) -> AppResult<Option<RegisteredToken>> {
        sqlx::query_as::<_, RegisteredToken>("SELECT * FROM token_registry WHERE token_id = $1")
            .bind(token_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find token", e))
    }

    /// Invalidate one record. Returns `true` if this call flipped it.
    pub async fn invalidate(&self, token_id: TokenId) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE token_registry SET state = 'invalidated', invalidated_at = NOW() \
             WHERE token_id = $1 AND state = 'active'",
        )
        .bind(token_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to invalidate token", e))?;
        Ok(result.rows_affected() == 1)
    }

    /// Invalidate every active record of an owner.
    pub async fn invalidate_all_by_owner(&self, owner_id: OwnerId) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE token_registry SET state = 'invalidated', invalidated_at = NOW() \
             WHERE owner_id = $1 AND state = 'active'",
        )
        .bind(owner_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to invalidate owner tokens", e)
        })?;
        Ok(result.rows_affected())
    }

    /// Invalidate every active record of an owner except `keep`.
    pub async fn invalidate_all_by_owner_except(
        &self,
        owner_id: OwnerId,
        keep: TokenId,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE token_registry SET state = 'invalidated', invalidated_at = NOW() \
             WHERE owner_id = $1 AND state = 'active' AND token_id <> $2",
        )
        .bind(owner_id)
        .bind(keep)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to invalidate owner tokens", e)
        })?;
        Ok(result.rows_affected())
    }

    /// Active records of an owner, newest first.
    pub async fn find_active_by_owner(&self, owner_id: OwnerId) -> AppResult<Vec<RegisteredToken>> {
        sqlx::query_as::<_, RegisteredToken>(
            "SELECT * FROM token_registry WHERE owner_id = $1 AND state = 'active' \
             ORDER BY issued_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find active tokens", e)
        })
    }

    /// All records of an owner in any state, newest first.
    pub async fn find_all_by_owner(&self, owner_id: OwnerId) -> AppResult<Vec<RegisteredToken>> {
        sqlx::query_as::<_, RegisteredToken>(
            "SELECT * FROM token_registry WHERE owner_id = $1 ORDER BY issued_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find tokens", e))
    }

    /// Delete records whose expiry is before `before`.
    pub async fn delete_expired(&self, before: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM token_registry WHERE expires_at < $1")
            .bind(before)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete expired tokens", e)
            })?;
        Ok(result.rows_affected())
    }

    /// Registry-wide counters evaluated at `now`.
    pub async fn stats(&self, now: DateTime<Utc>) -> AppResult<RegistryStats> {
        sqlx::query_as::<_, RegistryStats>(
            "SELECT \
               COUNT(*) FILTER (WHERE state = 'active' AND expires_at > $1) AS active, \
               COUNT(*) FILTER (WHERE state = 'invalidated') AS invalidated, \
               COUNT(*) FILTER (WHERE state = 'active' AND expires_at <= $1) AS expired \
             FROM token_registry",
        )
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to compute stats", e))
    }

    /// Check database connectivity.
    pub async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
    }
}
