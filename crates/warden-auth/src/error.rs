//! Authentication failure taxonomy.
//!
//! The variants are kept distinct for logging. Crossing into
//! [`AppError`] collapses every token rejection into one indistinguishable
//! `Forbidden` error so clients cannot tell which check failed.

use thiserror::Error;

use warden_core::error::{AppError, ErrorKind};
use warden_core::types::{OwnerId, TokenId};

/// Message returned to clients for every rejected token.
pub const NOT_AUTHORIZED: &str = "Not authorized";

/// Reasons an authentication, issuance, or rotation can fail.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Signature did not verify, or the token is malformed.
    #[error("token signature is invalid or the token is malformed")]
    InvalidSignature,
    /// The encoded expiry has passed.
    #[error("token has expired")]
    Expired,
    /// No active registry record exists for the token id.
    #[error("token {0} is not active in the registry")]
    Revoked(TokenId),
    /// The owner the token was issued for no longer exists.
    #[error("owner {0} no longer exists")]
    OwnerNotFound(OwnerId),
    /// The owner exists but may not sign in.
    #[error("owner {0} is not allowed to sign in")]
    OwnerInactive(OwnerId),
    /// Login credentials were rejected.
    #[error("invalid credentials")]
    InvalidCredentials,
    /// A registry write failed while issuing a pair.
    #[error("token registration failed: {0}")]
    RegistrationFailure(#[source] AppError),
    /// Any other infrastructure failure.
    #[error(transparent)]
    Internal(#[from] AppError),
}

/// Result alias for the token authority.
pub type AuthResult<T> = Result<T, AuthError>;

impl AuthError {
    /// Stable label for structured logs.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::InvalidSignature => "invalid_signature",
            Self::Expired => "expired",
            Self::Revoked(_) => "revoked",
            Self::OwnerNotFound(_) => "owner_not_found",
            Self::OwnerInactive(_) => "owner_inactive",
            Self::InvalidCredentials => "invalid_credentials",
            Self::RegistrationFailure(_) => "registration_failure",
            Self::Internal(_) => "internal",
        }
    }

    /// Whether this is a token rejection rather than an infrastructure fault.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::InvalidSignature
                | Self::Expired
                | Self::Revoked(_)
                | Self::OwnerNotFound(_)
                | Self::OwnerInactive(_)
        )
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidSignature
            | AuthError::Expired
            | AuthError::Revoked(_)
            | AuthError::OwnerNotFound(_)
            | AuthError::OwnerInactive(_) => AppError::forbidden(NOT_AUTHORIZED),
            AuthError::InvalidCredentials => AppError::unauthorized("Invalid credentials"),
            AuthError::RegistrationFailure(source) => AppError::with_source(
                ErrorKind::Internal,
                "Failed to issue tokens",
                source,
            ),
            AuthError::Internal(inner) => inner,
        }
    }
}
