//! JWT creation with per-kind signing keys.

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};

use warden_core::config::AuthConfig;
use warden_core::error::AppError;
use warden_core::types::TokenId;
use warden_entity::owner::Owner;
use warden_entity::token::TokenKind;

use super::claims::Claims;

/// A freshly signed token and the values its registry record needs.
#[derive(Debug, Clone)]
pub struct SignedToken {
    /// Compact JWT string.
    pub token: String,
    /// Embedded `jti`.
    pub token_id: TokenId,
    /// Access or refresh.
    pub kind: TokenKind,
    /// Issuance time.
    pub issued_at: DateTime<Utc>,
    /// Expiry, equal to the `exp` claim.
    pub expires_at: DateTime<Utc>,
}

/// Signs access tokens and refresh tokens with separate HMAC keys.
#[derive(Clone)]
pub struct JwtEncoder {
    access_key: EncodingKey,
    refresh_key: EncodingKey,
    access_ttl: Option<TimeDelta>,
    refresh_ttl: Option<TimeDelta>,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .finish()
    }
}

impl JwtEncoder {
    /// Creates a new encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            access_key: EncodingKey::from_secret(config.access_signing_key.as_bytes()),
            refresh_key: EncodingKey::from_secret(config.refresh_signing_key.as_bytes()),
            access_ttl: i64::try_from(config.access_ttl_minutes)
                .ok()
                .and_then(TimeDelta::try_minutes),
            refresh_ttl: i64::try_from(config.refresh_ttl_hours)
                .ok()
                .and_then(TimeDelta::try_hours),
        }
    }

    /// Signs a token of `kind` for `owner`, issued at `now`, with a fresh id.
    pub fn encode(
        &self,
        owner: &Owner,
        kind: TokenKind,
        now: DateTime<Utc>,
    ) -> Result<SignedToken, AppError> {
        let (key, ttl) = match kind {
            TokenKind::Access => (&self.access_key, self.access_ttl),
            TokenKind::Refresh => (&self.refresh_key, self.refresh_ttl),
        };

        let expires_at = ttl
            .and_then(|ttl| now.checked_add_signed(ttl))
            .and_then(|at| DateTime::from_timestamp(at.timestamp(), 0))
            .ok_or_else(|| AppError::internal(format!("{kind} token expiry out of range")))?;
        let exp = expires_at.timestamp();

        let claims = Claims {
            sub: owner.id.to_string(),
            email: owner.email.clone(),
            status: owner.status,
            jti: TokenId::new(),
            typ: kind,
            iat: now.timestamp(),
            exp,
        };

        let token = encode(&Header::default(), &claims, key)
            .map_err(|e| AppError::internal(format!("Failed to encode {kind} token: {e}")))?;

        Ok(SignedToken {
            token,
            token_id: claims.jti,
            kind,
            issued_at: now,
            expires_at,
        })
    }
}
