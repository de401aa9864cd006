//! Session summary shown to the owner.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use warden_core::types::TokenId;

use crate::token::RegisteredToken;

/// One logged-in device, represented by its active access token.
///
/// Never carries token material; `session_id` is the access token's
/// registry id and can be passed back to revoke the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Registry id of the session's access token.
    pub session_id: TokenId,
    /// Client description captured at login.
    pub device_label: Option<String>,
    /// Client address captured at login.
    pub origin_address: Option<String>,
    /// When the access token was issued.
    pub issued_at: DateTime<Utc>,
    /// When the access token expires.
    pub expires_at: DateTime<Utc>,
}

impl From<&RegisteredToken> for SessionSummary {
    fn from(token: &RegisteredToken) -> Self {
        Self {
            session_id: token.token_id,
            device_label: token.device_label.clone(),
            origin_address: token.origin_address.clone(),
            issued_at: token.issued_at,
            expires_at: token.expires_at,
        }
    }
}
