//! Owner repository implementation.

use sqlx::PgPool;

use warden_core::error::{AppError, ErrorKind};
use warden_core::result::AppResult;
use warden_core::types::OwnerId;
use warden_entity::owner::{CreateOwner, Owner, OwnerStatus};

/// Repository over the `owners` table.
#[derive(Debug, Clone)]
pub struct OwnerRepository {
    pool: PgPool,
}

impl OwnerRepository {
    /// Create a new owner repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an owner by ID.
    pub async fn find_by_id(&self, id: OwnerId) -> AppResult<Option<Owner>> {
        sqlx::query_as::<_, Owner>("SELECT * FROM owners WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find owner", e))
    }

    /// Find an owner by email (case-insensitive).
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<Owner>> {
        sqlx::query_as::<_, Owner>("SELECT * FROM owners WHERE LOWER(email) = LOWER($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find owner by email", e)
            })
    }

    /// List all owners ordered by id.
    pub async fn find_all(&self) -> AppResult<Vec<Owner>> {
        sqlx::query_as::<_, Owner>("SELECT * FROM owners ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list owners", e))
    }

    /// Create a new owner.
    pub async fn create(&self, data: &CreateOwner) -> AppResult<Owner> {
        sqlx::query_as::<_, Owner>(
            "INSERT INTO owners (email, password_hash, status) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&data.email)
        .bind(&data.password_hash)
        .bind(data.status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => AppError::with_source(
                ErrorKind::Conflict,
                format!("Email '{}' is already registered", data.email),
                e,
            ),
            other => AppError::with_source(ErrorKind::Database, "Failed to create owner", other),
        })
    }

    /// Update an owner's status. Returns `false` when the owner does not exist.
    pub async fn update_status(&self, id: OwnerId, status: OwnerStatus) -> AppResult<bool> {
        let result = sqlx::query("UPDATE owners SET status = $1 WHERE id = $2")
            .bind(status)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update owner status", e)
            })?;
        Ok(result.rows_affected() == 1)
    }
}
