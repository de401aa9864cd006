//! JWT signature and expiry verification.

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use warden_core::config::AuthConfig;
use warden_entity::token::TokenKind;

use crate::error::{AuthError, AuthResult};

use super::claims::Claims;

/// Verifies tokens against the key that matches their expected kind.
///
/// This only answers "is the token authentic and unexpired". Whether it is
/// still whitelisted is the registry's call.
#[derive(Clone)]
pub struct JwtDecoder {
    access_key: DecodingKey,
    refresh_key: DecodingKey,
    validation: Validation,
    leeway_seconds: i64,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a new decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = config.leeway_seconds;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            access_key: DecodingKey::from_secret(config.access_signing_key.as_bytes()),
            refresh_key: DecodingKey::from_secret(config.refresh_signing_key.as_bytes()),
            validation,
            leeway_seconds: config.leeway_seconds as i64,
        }
    }

    /// Verifies `token` as a token of kind `expected`.
    ///
    /// Fails with [`AuthError::Expired`] once `now >= exp` (plus leeway),
    /// otherwise with [`AuthError::InvalidSignature`] for anything forged,
    /// corrupted, or of the wrong kind.
    pub fn decode(&self, token: &str, expected: TokenKind) -> AuthResult<Claims> {
        let key = match expected {
            TokenKind::Access => &self.access_key,
            TokenKind::Refresh => &self.refresh_key,
        };

        let claims = decode::<Claims>(token, key, &self.validation)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::InvalidSignature,
            })?
            .claims;

        // The library accepts exp == now; the token is dead at that instant.
        if claims.exp + self.leeway_seconds <= Utc::now().timestamp() {
            return Err(AuthError::Expired);
        }

        if claims.typ != expected || claims.owner_id().is_none() {
            return Err(AuthError::InvalidSignature);
        }

        Ok(claims)
    }
}
