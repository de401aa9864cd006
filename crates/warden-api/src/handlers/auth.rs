//! Auth handlers: login, refresh, logout, logout-all, profile.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use validator::Validate;

use warden_core::error::AppError;

use crate::dto::request::{LoginRequest, LogoutRequest, RefreshRequest};
use crate::dto::response::{ApiResponse, LogoutResponse, ProfileResponse, TokenPairResponse};
use crate::error::ApiError;
use crate::extractors::{AuthOwner, ClientInfo};
use crate::state::AppState;

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    client: ClientInfo,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<TokenPairResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let pair = state
        .auth
        .login(&req.email, &req.password, client.provenance())
        .await?;

    Ok(Json(ApiResponse::ok(pair.into())))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<ApiResponse<TokenPairResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let pair = state.auth.refresh(&req.refresh_token).await?;
    Ok(Json(ApiResponse::ok(pair.into())))
}

/// POST /api/auth/logout
///
/// Always revokes the presented access token. An optional JSON body may
/// carry the session's refresh token to revoke it as well.
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthOwner,
    body: Bytes,
) -> Result<Json<ApiResponse<LogoutResponse>>, ApiError> {
    let req: LogoutRequest = if body.is_empty() {
        LogoutRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::validation(format!("Invalid logout body: {e}")))?
    };

    let mut revoked = u64::from(state.auth.logout(auth.token_id).await?.invalidated);

    if let Some(refresh_token) = req.refresh_token.as_deref() {
        if let Some(outcome) = state
            .auth
            .revoke_refresh_token(auth.owner_id, refresh_token)
            .await?
        {
            revoked += u64::from(outcome.invalidated);
        }
    }

    Ok(Json(ApiResponse::ok(LogoutResponse {
        message: "Logged out".to_string(),
        revoked,
    })))
}

/// POST /api/auth/logout-all
pub async fn logout_all(
    State(state): State<AppState>,
    auth: AuthOwner,
) -> Result<Json<ApiResponse<LogoutResponse>>, ApiError> {
    let revoked = state.auth.logout_all(auth.owner_id).await?;
    Ok(Json(ApiResponse::ok(LogoutResponse {
        message: "Logged out of all sessions".to_string(),
        revoked,
    })))
}

/// GET /api/auth/profile
pub async fn profile(
    State(state): State<AppState>,
    auth: AuthOwner,
) -> Result<Json<ApiResponse<ProfileResponse>>, ApiError> {
    let owner = state.auth.profile(auth.owner_id).await?;
    Ok(Json(ApiResponse::ok(owner.into())))
}
