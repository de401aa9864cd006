//! Session listing and single-session revocation.

use axum::Json;
use axum::extract::{Path, State};

use warden_core::types::TokenId;

use crate::dto::response::{ApiResponse, LogoutResponse, SessionResponse};
use crate::error::ApiError;
use crate::extractors::AuthOwner;
use crate::state::AppState;

/// GET /api/auth/sessions
pub async fn list_sessions(
    State(state): State<AppState>,
    auth: AuthOwner,
) -> Result<Json<ApiResponse<Vec<SessionResponse>>>, ApiError> {
    let sessions = state
        .auth
        .list_sessions(auth.owner_id)
        .await?
        .into_iter()
        .map(|s| SessionResponse::from_summary(s, auth.token_id))
        .collect();

    Ok(Json(ApiResponse::ok(sessions)))
}

/// DELETE /api/auth/sessions/{session_id}
pub async fn revoke_session(
    State(state): State<AppState>,
    auth: AuthOwner,
    Path(session_id): Path<TokenId>,
) -> Result<Json<ApiResponse<LogoutResponse>>, ApiError> {
    let outcome = state.auth.logout_owned(auth.owner_id, session_id).await?;
    Ok(Json(ApiResponse::ok(LogoutResponse {
        message: "Session revoked".to_string(),
        revoked: u64::from(outcome.invalidated),
    })))
}
