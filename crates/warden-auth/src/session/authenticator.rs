//! Whitelist-backed token authentication.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use warden_core::types::{OwnerId, TokenId};
use warden_entity::owner::OwnerStatus;
use warden_entity::token::{TokenKind, TokenState};

use crate::error::{AuthError, AuthResult};
use crate::jwt::JwtDecoder;
use crate::registry::TokenRegistry;

/// Identity established by a successfully authenticated token.
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticatedOwner {
    /// Owner the token was issued for.
    pub owner_id: OwnerId,
    /// Email claim frozen at issuance.
    pub email: String,
    /// Status claim frozen at issuance.
    pub status: OwnerStatus,
    /// Registry id of the presented token.
    pub token_id: TokenId,
    /// Kind of the presented token.
    pub kind: TokenKind,
    /// Expiry of the presented token.
    pub expires_at: DateTime<Utc>,
    /// Device label recorded with the token.
    pub device_label: Option<String>,
    /// Origin address recorded with the token.
    pub origin_address: Option<String>,
}

/// Validates signed tokens: signature and expiry first, then a single
/// registry lookup by `token_id`.
#[derive(Clone)]
pub struct SessionAuthenticator {
    decoder: Arc<JwtDecoder>,
    registry: Arc<dyn TokenRegistry>,
}

impl std::fmt::Debug for SessionAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionAuthenticator")
            .field("decoder", &self.decoder)
            .finish()
    }
}

impl SessionAuthenticator {
    /// Creates a new authenticator.
    pub fn new(decoder: Arc<JwtDecoder>, registry: Arc<dyn TokenRegistry>) -> Self {
        Self { decoder, registry }
    }

    /// Authenticates `token` as a token of kind `expected`.
    ///
    /// A token is accepted only if its signature verifies, it has not
    /// expired, and the registry holds an `Active` record with the same id,
    /// kind, and owner. Missing and invalidated records both fail with
    /// [`AuthError::Revoked`].
    pub async fn authenticate(
        &self,
        token: &str,
        expected: TokenKind,
    ) -> AuthResult<AuthenticatedOwner> {
        let claims = self.decoder.decode(token, expected)?;
        let owner_id = claims.owner_id().ok_or(AuthError::InvalidSignature)?;

        let record = self
            .registry
            .find(claims.jti)
            .await?
            .filter(|r| {
                r.state == TokenState::Active && r.kind == expected && r.owner_id == owner_id
            })
            .ok_or(AuthError::Revoked(claims.jti))?;

        Ok(AuthenticatedOwner {
            owner_id,
            email: claims.email,
            status: claims.status,
            token_id: claims.jti,
            kind: expected,
            expires_at: record.expires_at,
            device_label: record.device_label,
            origin_address: record.origin_address,
        })
    }
}
