//! Owner account status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account status for an owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "owner_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OwnerStatus {
    /// Account is active and can log in.
    Active,
    /// Account is suspended by an administrator.
    Suspended,
}

impl OwnerStatus {
    /// Check if the owner can log in or refresh with this status.
    pub fn can_login(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Suspended => "suspended",
        }
    }
}

impl fmt::Display for OwnerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OwnerStatus {
    type Err = warden_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "suspended" => Ok(Self::Suspended),
            _ => Err(warden_core::AppError::validation(format!(
                "Invalid owner status: '{s}'. Expected one of: active, suspended"
            ))),
        }
    }
}
