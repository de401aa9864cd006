//! JWT claims structure shared by access and refresh tokens.

use serde::{Deserialize, Serialize};

use warden_core::types::{OwnerId, TokenId};
use warden_entity::owner::OwnerStatus;
use warden_entity::token::TokenKind;

/// Claims payload embedded in every signed token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject, the owner id rendered as a string.
    pub sub: String,
    /// Owner email at issuance.
    pub email: String,
    /// Owner status at issuance.
    pub status: OwnerStatus,
    /// Registry id of this token.
    pub jti: TokenId,
    /// Access or refresh.
    pub typ: TokenKind,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// Parse the subject back into an owner id.
    pub fn owner_id(&self) -> Option<OwnerId> {
        self.sub.parse().ok()
    }
}
