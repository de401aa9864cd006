//! Refresh token rotation.

use std::sync::Arc;

use tracing::{info, warn};

use warden_core::types::TokenId;
use warden_entity::token::TokenKind;

use crate::error::{AuthError, AuthResult};
use crate::owner::OwnerDirectory;
use crate::registry::TokenRegistry;

use super::authenticator::SessionAuthenticator;
use super::issuer::{IssuedTokens, Provenance, TokenIssuer};

/// Exchanges a refresh token for a new pair and burns the old one.
#[derive(Clone)]
pub struct RotationCoordinator {
    authenticator: Arc<SessionAuthenticator>,
    issuer: Arc<TokenIssuer>,
    directory: Arc<dyn OwnerDirectory>,
    registry: Arc<dyn TokenRegistry>,
    revoke_all_on_reuse: bool,
}

impl std::fmt::Debug for RotationCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotationCoordinator")
            .field("revoke_all_on_reuse", &self.revoke_all_on_reuse)
            .finish()
    }
}

impl RotationCoordinator {
    /// Creates a new coordinator.
    pub fn new(
        authenticator: Arc<SessionAuthenticator>,
        issuer: Arc<TokenIssuer>,
        directory: Arc<dyn OwnerDirectory>,
        registry: Arc<dyn TokenRegistry>,
        revoke_all_on_reuse: bool,
    ) -> Self {
        Self {
            authenticator,
            issuer,
            directory,
            registry,
            revoke_all_on_reuse,
        }
    }

    /// Rotates `refresh_token`.
    ///
    /// The new pair is registered before the old refresh record is
    /// invalidated. If the old record was invalidated concurrently, this
    /// call lost the race: the pair it just minted is discarded and the
    /// call fails with [`AuthError::Revoked`].
    pub async fn refresh(&self, refresh_token: &str) -> AuthResult<IssuedTokens> {
        let presented = match self
            .authenticator
            .authenticate(refresh_token, TokenKind::Refresh)
            .await
        {
            Ok(presented) => presented,
            Err(AuthError::Revoked(token_id)) => {
                self.check_reuse(token_id).await;
                return Err(AuthError::Revoked(token_id));
            }
            Err(e) => return Err(e),
        };

        let owner = self
            .directory
            .find(presented.owner_id)
            .await?
            .ok_or(AuthError::OwnerNotFound(presented.owner_id))?;
        if !owner.status.can_login() {
            return Err(AuthError::OwnerInactive(owner.id));
        }

        let provenance = Provenance {
            device_label: presented.device_label.clone(),
            origin_address: presented.origin_address.clone(),
        };
        let pair = self.issuer.issue(&owner, &provenance).await?;

        match self.registry.invalidate(presented.token_id).await {
            Ok(true) => {}
            Ok(false) => {
                warn!(
                    owner_id = %owner.id,
                    token_id = %presented.token_id,
                    "Refresh token was consumed concurrently, discarding new pair"
                );
                self.discard(&pair).await;
                return Err(AuthError::Revoked(presented.token_id));
            }
            Err(e) => {
                self.discard(&pair).await;
                return Err(AuthError::Internal(e));
            }
        }

        info!(
            owner_id = %owner.id,
            old_token_id = %presented.token_id,
            access_token_id = %pair.access.token_id,
            refresh_token_id = %pair.refresh.token_id,
            "Rotated refresh token"
        );

        Ok(pair)
    }

    /// A correctly signed refresh token whose record is invalidated was
    /// already rotated or logged out. Treat a second use as a compromise
    /// signal.
    async fn check_reuse(&self, token_id: TokenId) {
        let record = match self.registry.find(token_id).await {
            Ok(Some(record)) if record.is_invalidated() => record,
            Ok(_) => return,
            Err(e) => {
                warn!(token_id = %token_id, error = %e, "Reuse check lookup failed");
                return;
            }
        };

        warn!(
            owner_id = %record.owner_id,
            token_id = %token_id,
            "Refresh token reuse detected"
        );

        if self.revoke_all_on_reuse {
            match self.registry.invalidate_all_for_owner(record.owner_id).await {
                Ok(count) => warn!(
                    owner_id = %record.owner_id,
                    count,
                    "Revoked all tokens after refresh token reuse"
                ),
                Err(e) => warn!(
                    owner_id = %record.owner_id,
                    error = %e,
                    "Failed to revoke tokens after refresh token reuse"
                ),
            }
        }
    }

    async fn discard(&self, pair: &IssuedTokens) {
        for token_id in [pair.access.token_id, pair.refresh.token_id] {
            if let Err(e) = self.registry.invalidate(token_id).await {
                warn!(token_id = %token_id, error = %e, "Failed to discard token");
            }
        }
    }
}
