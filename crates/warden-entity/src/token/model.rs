//! Registered token entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use warden_core::types::{OwnerId, TokenId};

use super::{TokenKind, TokenState};

/// Server-side record of one issued token.
///
/// A signed token is honored only while a record with its `token_id`
/// exists and is [`TokenState::Active`].
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RegisteredToken {
    /// Identifier embedded in the signed token as `jti`.
    pub token_id: TokenId,
    /// Owner the token was issued for.
    pub owner_id: OwnerId,
    /// Access or refresh.
    pub kind: TokenKind,
    /// Stored lifecycle state.
    pub state: TokenState,
    /// Client description captured at issuance (display only).
    pub device_label: Option<String>,
    /// Client network address captured at issuance (display only).
    pub origin_address: Option<String>,
    /// Absolute expiry, identical to the signed `exp` claim.
    pub expires_at: DateTime<Utc>,
    /// When the record was created.
    pub issued_at: DateTime<Utc>,
    /// When the record was invalidated.
    pub invalidated_at: Option<DateTime<Utc>>,
}

impl RegisteredToken {
    /// Whether the record is `Active` and not yet past its expiry.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.state == TokenState::Active && !self.is_expired(now)
    }

    /// Whether the expiry has passed.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    /// Whether the record has been invalidated.
    pub fn is_invalidated(&self) -> bool {
        self.state == TokenState::Invalidated
    }
}

/// Data required to register a freshly minted token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRegisteredToken {
    /// Identifier embedded as `jti`.
    pub token_id: TokenId,
    /// Owner the token was issued for.
    pub owner_id: OwnerId,
    /// Access or refresh.
    pub kind: TokenKind,
    /// Client description.
    pub device_label: Option<String>,
    /// Client network address.
    pub origin_address: Option<String>,
    /// Absolute expiry.
    pub expires_at: DateTime<Utc>,
    /// Issuance time.
    pub issued_at: DateTime<Utc>,
}

impl NewRegisteredToken {
    /// Materialize the record as it looks right after registration.
    pub fn into_active(self) -> RegisteredToken {
        RegisteredToken {
            token_id: self.token_id,
            owner_id: self.owner_id,
            kind: self.kind,
            state: TokenState::Active,
            device_label: self.device_label,
            origin_address: self.origin_address,
            expires_at: self.expires_at,
            issued_at: self.issued_at,
            invalidated_at: None,
        }
    }
}

/// Registry-wide counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct RegistryStats {
    /// Active records that have not expired.
    pub active: i64,
    /// Records in the `Invalidated` state.
    pub invalidated: i64,
    /// Active records whose expiry has passed but were not yet swept.
    pub expired: i64,
}
