//! Token state enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stored lifecycle state of a registered token.
///
/// The only permitted transition is `Active -> Invalidated`. Expiry is
/// derived from `expires_at` and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "token_state", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TokenState {
    /// Token may be honored.
    Active,
    /// Token was revoked by logout, rotation, or bulk invalidation.
    Invalidated,
}

impl TokenState {
    /// Return the state as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Invalidated => "invalidated",
        }
    }
}

impl fmt::Display for TokenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
