//! The token authority's public surface.
//!
//! [`AuthService`] wires the issuer, authenticator, rotation coordinator,
//! and session manager around one registry and is what route handlers
//! call. Every operation returns [`AppError`]; rejection details are
//! logged here and collapsed by the `AuthError -> AppError` conversion.

use std::sync::Arc;

use tracing::{info, warn};

use warden_core::config::AuthConfig;
use warden_core::error::AppError;
use warden_core::result::AppResult;
use warden_core::types::{OwnerId, TokenId};
use warden_entity::owner::Owner;
use warden_entity::session::SessionSummary;
use warden_entity::token::TokenKind;

use crate::error::AuthError;
use crate::jwt::{JwtDecoder, JwtEncoder};
use crate::owner::{CredentialVerifier, OwnerDirectory};
use crate::registry::TokenRegistry;
use crate::session::{
    AuthenticatedOwner, IssuedTokens, LogoutOutcome, Provenance, RotationCoordinator,
    SessionAuthenticator, SessionManager, TokenIssuer,
};

/// Facade over the token lifecycle.
#[derive(Clone)]
pub struct AuthService {
    issuer: Arc<TokenIssuer>,
    authenticator: Arc<SessionAuthenticator>,
    rotation: Arc<RotationCoordinator>,
    sessions: Arc<SessionManager>,
    registry: Arc<dyn TokenRegistry>,
    verifier: Arc<dyn CredentialVerifier>,
    directory: Arc<dyn OwnerDirectory>,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("rotation", &self.rotation)
            .finish()
    }
}

impl AuthService {
    /// Builds the service from configuration and its three collaborators.
    pub fn new(
        config: &AuthConfig,
        registry: Arc<dyn TokenRegistry>,
        verifier: Arc<dyn CredentialVerifier>,
        directory: Arc<dyn OwnerDirectory>,
    ) -> Self {
        let issuer = Arc::new(TokenIssuer::new(
            Arc::new(JwtEncoder::new(config)),
            registry.clone(),
        ));
        let authenticator = Arc::new(SessionAuthenticator::new(
            Arc::new(JwtDecoder::new(config)),
            registry.clone(),
        ));
        let rotation = Arc::new(RotationCoordinator::new(
            authenticator.clone(),
            issuer.clone(),
            directory.clone(),
            registry.clone(),
            config.revoke_all_on_refresh_reuse,
        ));
        let sessions = Arc::new(SessionManager::new(registry.clone()));

        Self {
            issuer,
            authenticator,
            rotation,
            sessions,
            registry,
            verifier,
            directory,
        }
    }

    /// Verifies credentials and issues a new pair.
    ///
    /// Unknown identifiers, wrong secrets, and owners that may not sign in
    /// all fail with the same `Unauthorized` error.
    pub async fn login(
        &self,
        identifier: &str,
        secret: &str,
        provenance: Provenance,
    ) -> AppResult<IssuedTokens> {
        let owner = match self.verifier.verify(identifier, secret).await? {
            Some(owner) if owner.status.can_login() => owner,
            Some(owner) => {
                warn!(owner_id = %owner.id, status = %owner.status, "Login refused for inactive owner");
                return Err(AuthError::InvalidCredentials.into());
            }
            None => {
                warn!("Login failed: invalid credentials");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        let pair = self
            .issuer
            .issue(&owner, &provenance)
            .await
            .map_err(|e| reject("login", e))?;
        info!(owner_id = %owner.id, "Login succeeded");
        Ok(pair)
    }

    /// Rotates a refresh token into a new pair.
    pub async fn refresh(&self, refresh_token: &str) -> AppResult<IssuedTokens> {
        self.rotation
            .refresh(refresh_token)
            .await
            .map_err(|e| reject("refresh", e))
    }

    /// Gate for protected requests: authenticates an access token.
    pub async fn authenticate_request(&self, access_token: &str) -> AppResult<AuthenticatedOwner> {
        self.authenticator
            .authenticate(access_token, TokenKind::Access)
            .await
            .map_err(|e| reject("authenticate", e))
    }

    /// Invalidates one token by id. Idempotent.
    pub async fn logout(&self, token_id: TokenId) -> AppResult<LogoutOutcome> {
        self.sessions.logout(token_id).await
    }

    /// Invalidates one of `owner_id`'s own tokens.
    ///
    /// Ids that belong to another owner are treated exactly like absent ids.
    pub async fn logout_owned(&self, owner_id: OwnerId, token_id: TokenId) -> AppResult<LogoutOutcome> {
        match self.registry.find(token_id).await? {
            Some(record) if record.owner_id == owner_id => self.sessions.logout(token_id).await,
            _ => Ok(LogoutOutcome {
                token_id,
                invalidated: false,
            }),
        }
    }

    /// Invalidates a refresh token presented by `owner_id` at logout.
    ///
    /// A token that does not authenticate, or belongs to someone else, is
    /// ignored.
    pub async fn revoke_refresh_token(
        &self,
        owner_id: OwnerId,
        refresh_token: &str,
    ) -> AppResult<Option<LogoutOutcome>> {
        match self
            .authenticator
            .authenticate(refresh_token, TokenKind::Refresh)
            .await
        {
            Ok(presented) if presented.owner_id == owner_id => {
                self.sessions.logout(presented.token_id).await.map(Some)
            }
            Ok(_) => Ok(None),
            Err(AuthError::Internal(e)) => Err(e),
            Err(e) => {
                warn!(owner_id = %owner_id, reason = e.reason(), "Ignoring refresh token at logout");
                Ok(None)
            }
        }
    }

    /// Invalidates every active token of `owner_id`.
    pub async fn logout_all(&self, owner_id: OwnerId) -> AppResult<u64> {
        self.sessions.logout_all(owner_id).await
    }

    /// Invalidates every active token of `owner_id` except `keep`.
    pub async fn logout_others(&self, owner_id: OwnerId, keep: TokenId) -> AppResult<u64> {
        self.sessions.logout_others(owner_id, keep).await
    }

    /// Active sessions of `owner_id`, newest first.
    pub async fn list_sessions(&self, owner_id: OwnerId) -> AppResult<Vec<SessionSummary>> {
        self.sessions.list_active_sessions(owner_id).await
    }

    /// Current owner record.
    pub async fn profile(&self, owner_id: OwnerId) -> AppResult<Owner> {
        self.directory
            .find(owner_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Owner {owner_id} not found")))
    }

    /// Whether the registry backend is reachable.
    pub async fn registry_health(&self) -> bool {
        match self.registry.health_check().await {
            Ok(healthy) => healthy,
            Err(e) => {
                warn!(error = %e, "Registry health check failed");
                false
            }
        }
    }
}

/// Logs the specific failure, then hands back the client-safe error.
fn reject(operation: &'static str, err: AuthError) -> AppError {
    if err.is_rejection() {
        warn!(operation, reason = err.reason(), error = %err, "Token rejected");
    } else {
        warn!(operation, reason = err.reason(), error = %err, "Token operation failed");
    }
    err.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_core::error::ErrorKind;
    use warden_entity::owner::OwnerStatus;

    use crate::owner::MemoryOwnerDirectory;
    use crate::registry::MemoryTokenRegistry;
    use crate::test_support::{auth_config, directory};

    async fn service() -> (AuthService, MemoryOwnerDirectory) {
        let directory = directory();
        directory
            .add_owner(OwnerId(7), "seven@example.com", "s3cret", OwnerStatus::Active)
            .await
            .expect("add");
        directory
            .add_owner(OwnerId(8), "eight@example.com", "s3cret", OwnerStatus::Active)
            .await
            .expect("add");
        let service = AuthService::new(
            &auth_config(),
            Arc::new(MemoryTokenRegistry::new()),
            Arc::new(directory.clone()),
            Arc::new(directory.clone()),
        );
        (service, directory)
    }

    async fn login(service: &AuthService, email: &str) -> IssuedTokens {
        service
            .login(email, "s3cret", Provenance::default())
            .await
            .expect("login")
    }

    #[tokio::test]
    async fn test_login_failures_are_unauthorized() {
        let (service, directory) = service().await;

        let err = service
            .login("seven@example.com", "wrong", Provenance::default())
            .await
            .expect_err("bad password");
        assert_eq!(err.kind, ErrorKind::Unauthorized);

        let err = service
            .login("nobody@example.com", "s3cret", Provenance::default())
            .await
            .expect_err("unknown owner");
        assert_eq!(err.kind, ErrorKind::Unauthorized);

        directory
            .set_status(OwnerId(7), OwnerStatus::Suspended)
            .await;
        let err = service
            .login("seven@example.com", "s3cret", Provenance::default())
            .await
            .expect_err("suspended owner");
        assert_eq!(err.kind, ErrorKind::Unauthorized);
    }

    #[tokio::test]
    async fn test_login_tokens_validate_immediately() {
        let (service, _) = service().await;
        let pair = login(&service, "seven@example.com").await;

        let owner = service
            .authenticate_request(&pair.access.token)
            .await
            .expect("access valid");
        assert_eq!(owner.owner_id, OwnerId(7));

        let err = service
            .authenticate_request(&pair.refresh.token)
            .await
            .expect_err("refresh token is not an access token");
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn test_rejections_share_one_message() {
        let (service, _) = service().await;
        let pair = login(&service, "seven@example.com").await;
        service.logout(pair.access.token_id).await.expect("logout");

        let revoked = service
            .authenticate_request(&pair.access.token)
            .await
            .expect_err("revoked");
        let garbage = service
            .authenticate_request("garbage")
            .await
            .expect_err("garbage");
        assert_eq!(revoked.kind, garbage.kind);
        assert_eq!(revoked.message, garbage.message);
    }

    #[tokio::test]
    async fn test_logout_owned_ignores_foreign_tokens() {
        let (service, _) = service().await;
        let seven = login(&service, "seven@example.com").await;

        let outcome = service
            .logout_owned(OwnerId(8), seven.access.token_id)
            .await
            .expect("no-op");
        assert!(!outcome.invalidated);
        service
            .authenticate_request(&seven.access.token)
            .await
            .expect("still valid");

        let outcome = service
            .logout_owned(OwnerId(7), seven.access.token_id)
            .await
            .expect("own token");
        assert!(outcome.invalidated);
    }

    #[tokio::test]
    async fn test_revoke_refresh_token_checks_owner() {
        let (service, _) = service().await;
        let seven = login(&service, "seven@example.com").await;

        let ignored = service
            .revoke_refresh_token(OwnerId(8), &seven.refresh.token)
            .await
            .expect("ignored");
        assert!(ignored.is_none());

        let revoked = service
            .revoke_refresh_token(OwnerId(7), &seven.refresh.token)
            .await
            .expect("revoked")
            .expect("outcome");
        assert!(revoked.invalidated);

        let err = service
            .refresh(&seven.refresh.token)
            .await
            .expect_err("refresh token gone");
        assert_eq!(err.kind, ErrorKind::Forbidden);
    }

    #[tokio::test]
    async fn test_profile() {
        let (service, directory) = service().await;
        let owner = service.profile(OwnerId(7)).await.expect("profile");
        assert_eq!(owner.email, "seven@example.com");

        directory.remove(OwnerId(7)).await;
        let err = service.profile(OwnerId(7)).await.expect_err("gone");
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert!(service.registry_health().await);
    }
}
