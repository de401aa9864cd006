//! Minting and registering access/refresh pairs.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use warden_entity::owner::Owner;
use warden_entity::token::{NewRegisteredToken, TokenKind};

use crate::error::{AuthError, AuthResult};
use crate::jwt::{JwtEncoder, SignedToken};
use crate::registry::TokenRegistry;

/// Column limits of `token_registry`.
const MAX_DEVICE_LABEL_CHARS: usize = 500;
const MAX_ORIGIN_ADDRESS_CHARS: usize = 45;

/// Client metadata recorded with a pair. Display only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Provenance {
    /// Client description, usually the User-Agent.
    pub device_label: Option<String>,
    /// Client network address.
    pub origin_address: Option<String>,
}

impl Provenance {
    /// Normalizes raw client metadata: blanks become `None`, long values
    /// are cut to the column width.
    pub fn new(device_label: Option<&str>, origin_address: Option<&str>) -> Self {
        Self {
            device_label: clean(device_label, MAX_DEVICE_LABEL_CHARS),
            origin_address: clean(origin_address, MAX_ORIGIN_ADDRESS_CHARS),
        }
    }
}

fn clean(value: Option<&str>, max_chars: usize) -> Option<String> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }
    Some(value.chars().take(max_chars).collect())
}

/// A registered access/refresh pair.
#[derive(Debug, Clone)]
pub struct IssuedTokens {
    /// Short-lived access token.
    pub access: SignedToken,
    /// Long-lived refresh token.
    pub refresh: SignedToken,
}

/// Mints token pairs and registers both halves before handing them out.
#[derive(Clone)]
pub struct TokenIssuer {
    encoder: Arc<JwtEncoder>,
    registry: Arc<dyn TokenRegistry>,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("encoder", &self.encoder)
            .finish()
    }
}

impl TokenIssuer {
    /// Creates a new issuer.
    pub fn new(encoder: Arc<JwtEncoder>, registry: Arc<dyn TokenRegistry>) -> Self {
        Self { encoder, registry }
    }

    /// Issues a pair for `owner`.
    ///
    /// Both records are `Active` in the registry before this returns. If the
    /// refresh registration fails, the access record already written is
    /// invalidated and no token is returned.
    pub async fn issue(&self, owner: &Owner, provenance: &Provenance) -> AuthResult<IssuedTokens> {
        let now = Utc::now();
        let access = self.encoder.encode(owner, TokenKind::Access, now)?;
        let refresh = self.encoder.encode(owner, TokenKind::Refresh, now)?;

        self.registry
            .register(record_for(owner, &access, provenance))
            .await
            .map_err(AuthError::RegistrationFailure)?;

        if let Err(e) = self
            .registry
            .register(record_for(owner, &refresh, provenance))
            .await
        {
            if let Err(undo) = self.registry.invalidate(access.token_id).await {
                warn!(
                    token_id = %access.token_id,
                    error = %undo,
                    "Failed to invalidate orphaned access token"
                );
            }
            return Err(AuthError::RegistrationFailure(e));
        }

        info!(
            owner_id = %owner.id,
            access_token_id = %access.token_id,
            refresh_token_id = %refresh.token_id,
            "Issued token pair"
        );

        Ok(IssuedTokens { access, refresh })
    }
}

fn record_for(owner: &Owner, token: &SignedToken, provenance: &Provenance) -> NewRegisteredToken {
    NewRegisteredToken {
        token_id: token.token_id,
        owner_id: owner.id,
        kind: token.kind,
        device_label: provenance.device_label.clone(),
        origin_address: provenance.origin_address.clone(),
        expires_at: token.expires_at,
        issued_at: token.issued_at,
    }
}
