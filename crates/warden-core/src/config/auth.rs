//! Token signing configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Longest accepted access token lifetime (one day).
pub const MAX_ACCESS_TTL_MINUTES: u64 = 24 * 60;

/// Longest accepted refresh token lifetime (one year).
pub const MAX_REFRESH_TTL_HOURS: u64 = 24 * 365;

/// Signing keys and lifetimes for access and refresh tokens.
///
/// The two keys must differ: a leaked access key must never be able to
/// mint refresh tokens.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC-SHA256 secret for access tokens.
    pub access_signing_key: String,
    /// HMAC-SHA256 secret for refresh tokens.
    pub refresh_signing_key: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub access_ttl_minutes: u64,
    /// Refresh token TTL in hours.
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_hours: u64,
    /// Allowed clock skew in seconds when checking expiry.
    #[serde(default)]
    pub leeway_seconds: u64,
    /// Invalidate every active token of an owner when an already rotated
    /// refresh token is presented again.
    #[serde(default)]
    pub revoke_all_on_refresh_reuse: bool,
}

impl AuthConfig {
    /// Reject configurations that would weaken token separation.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.access_signing_key.is_empty() || self.refresh_signing_key.is_empty() {
            return Err(AppError::configuration("Signing keys must not be empty"));
        }
        if self.access_signing_key == self.refresh_signing_key {
            return Err(AppError::configuration(
                "Access and refresh signing keys must differ",
            ));
        }
        if self.access_ttl_minutes == 0 || self.refresh_ttl_hours == 0 {
            return Err(AppError::configuration("Token TTLs must be positive"));
        }
        if self.access_ttl_minutes > MAX_ACCESS_TTL_MINUTES {
            return Err(AppError::configuration(format!(
                "access_ttl_minutes must not exceed {MAX_ACCESS_TTL_MINUTES}"
            )));
        }
        if self.refresh_ttl_hours > MAX_REFRESH_TTL_HOURS {
            return Err(AppError::configuration(format!(
                "refresh_ttl_hours must not exceed {MAX_REFRESH_TTL_HOURS}"
            )));
        }
        Ok(())
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("access_signing_key", &"***")
            .field("refresh_signing_key", &"***")
            .field("access_ttl_minutes", &self.access_ttl_minutes)
            .field("refresh_ttl_hours", &self.refresh_ttl_hours)
            .field("leeway_seconds", &self.leeway_seconds)
            .field(
                "revoke_all_on_refresh_reuse",
                &self.revoke_all_on_refresh_reuse,
            )
            .finish()
    }
}

fn default_access_ttl() -> u64 {
    15
}

fn default_refresh_ttl() -> u64 {
    168
}
