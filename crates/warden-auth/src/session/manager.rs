//! Session listing and revocation.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::info;

use warden_core::result::AppResult;
use warden_core::types::{OwnerId, TokenId};
use warden_entity::session::SessionSummary;
use warden_entity::token::TokenKind;

use crate::registry::TokenRegistry;

/// Result of a single logout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LogoutOutcome {
    /// Token that was targeted.
    pub token_id: TokenId,
    /// Whether this call moved the record from `Active` to `Invalidated`.
    pub invalidated: bool,
}

/// Lists and revokes an owner's sessions.
#[derive(Clone)]
pub struct SessionManager {
    registry: Arc<dyn TokenRegistry>,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager").finish()
    }
}

impl SessionManager {
    /// Creates a new session manager.
    pub fn new(registry: Arc<dyn TokenRegistry>) -> Self {
        Self { registry }
    }

    /// Active, unexpired access tokens of `owner_id`, newest first.
    pub async fn list_active_sessions(&self, owner_id: OwnerId) -> AppResult<Vec<SessionSummary>> {
        let now = Utc::now();
        let records = self.registry.active_for_owner(owner_id).await?;

        Ok(records
            .iter()
            .filter(|r| r.kind == TokenKind::Access && r.is_active(now))
            .map(SessionSummary::from)
            .collect())
    }

    /// Invalidates one record. Absent or already invalidated records are
    /// reported with `invalidated: false`, never as an error.
    pub async fn logout(&self, token_id: TokenId) -> AppResult<LogoutOutcome> {
        let invalidated = self.registry.invalidate(token_id).await?;
        info!(token_id = %token_id, invalidated, "Logout");
        Ok(LogoutOutcome {
            token_id,
            invalidated,
        })
    }

    /// Invalidates every active record of `owner_id`, both kinds.
    pub async fn logout_all(&self, owner_id: OwnerId) -> AppResult<u64> {
        let count = self.registry.invalidate_all_for_owner(owner_id).await?;
        info!(owner_id = %owner_id, count, "Logged out all sessions");
        Ok(count)
    }

    /// Invalidates every active record of `owner_id` except `keep`.
    pub async fn logout_others(&self, owner_id: OwnerId, keep: TokenId) -> AppResult<u64> {
        let count = self
            .registry
            .invalidate_all_for_owner_except(owner_id, keep)
            .await?;
        info!(owner_id = %owner_id, keep = %keep, count, "Logged out other sessions");
        Ok(count)
    }
}
