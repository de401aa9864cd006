//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use warden_auth::IssuedTokens;
use warden_core::types::{OwnerId, TokenId};
use warden_entity::owner::Owner;
use warden_entity::session::SessionSummary;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Token pair returned by login and refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPairResponse {
    /// Access token.
    pub access_token: String,
    /// Refresh token.
    pub refresh_token: String,
    /// Always `"Bearer"`.
    pub token_type: String,
    /// Access token expiration.
    pub access_expires_at: DateTime<Utc>,
    /// Refresh token expiration.
    pub refresh_expires_at: DateTime<Utc>,
    /// Session id as shown in the session list.
    pub session_id: TokenId,
}

impl From<IssuedTokens> for TokenPairResponse {
    fn from(pair: IssuedTokens) -> Self {
        Self {
            session_id: pair.access.token_id,
            access_expires_at: pair.access.expires_at,
            refresh_expires_at: pair.refresh.expires_at,
            access_token: pair.access.token,
            refresh_token: pair.refresh.token,
            token_type: "Bearer".to_string(),
        }
    }
}

/// One active session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    /// Session id, usable with `DELETE /api/auth/sessions/{session_id}`.
    pub session_id: TokenId,
    /// Device label, or `"Unknown device"`.
    pub device: String,
    /// Origin address, or `"Unknown"`.
    pub origin_address: String,
    /// Login time.
    pub issued_at: DateTime<Utc>,
    /// Access token expiry.
    pub expires_at: DateTime<Utc>,
    /// Whether this is the session making the request.
    pub current: bool,
}

impl SessionResponse {
    /// Builds the view of `summary` as seen by the holder of `current`.
    pub fn from_summary(summary: SessionSummary, current: TokenId) -> Self {
        Self {
            current: summary.session_id == current,
            session_id: summary.session_id,
            device: summary
                .device_label
                .unwrap_or_else(|| "Unknown device".to_string()),
            origin_address: summary
                .origin_address
                .unwrap_or_else(|| "Unknown".to_string()),
            issued_at: summary.issued_at,
            expires_at: summary.expires_at,
        }
    }
}

/// Owner profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    /// Owner id.
    pub id: OwnerId,
    /// Email.
    pub email: String,
    /// Account status.
    pub status: String,
    /// Account creation time.
    pub created_at: DateTime<Utc>,
}

impl From<Owner> for ProfileResponse {
    fn from(owner: Owner) -> Self {
        Self {
            id: owner.id,
            email: owner.email,
            status: owner.status.to_string(),
            created_at: owner.created_at,
        }
    }
}

/// Result of a logout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    /// Confirmation message.
    pub message: String,
    /// Number of records this call invalidated.
    pub revoked: u64,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"` or `"degraded"`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Seconds since startup.
    pub uptime_seconds: u64,
    /// `"connected"` or `"unavailable"`.
    pub registry: String,
}
