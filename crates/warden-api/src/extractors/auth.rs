//! `AuthOwner` extractor: pulls the bearer token from the Authorization
//! header and authenticates it against the registry.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use warden_auth::AuthenticatedOwner;
use warden_auth::error::NOT_AUTHORIZED;
use warden_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated caller available in handlers.
#[derive(Debug, Clone)]
pub struct AuthOwner(pub AuthenticatedOwner);

impl std::ops::Deref for AuthOwner {
    type Target = AuthenticatedOwner;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthOwner {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // A missing header is indistinguishable from a bad token.
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::forbidden(NOT_AUTHORIZED))?;

        let owner = state.auth.authenticate_request(token).await?;
        Ok(AuthOwner(owner))
    }
}
