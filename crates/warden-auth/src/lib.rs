//! # warden-auth
//!
//! The token authority: issues access/refresh pairs, validates them against
//! the whitelist registry on every request, rotates refresh tokens, and
//! revokes sessions.
//!
//! ## Modules
//!
//! - `jwt`: claims, signing, and signature/expiry verification
//! - `registry`: the whitelist store trait and its backends
//! - `owner`: credential verification and owner lookup collaborators
//! - `password`: Argon2id password hashing
//! - `session`: issuer, authenticator, rotation, session manager, cleanup
//! - `service`: the [`AuthService`] facade used by the HTTP layer

pub mod error;
pub mod jwt;
pub mod owner;
pub mod password;
pub mod registry;
pub mod service;
pub mod session;

#[cfg(test)]
mod test_support;

pub use error::{AuthError, AuthResult};
pub use jwt::{Claims, JwtDecoder, JwtEncoder, SignedToken};
pub use owner::{CredentialVerifier, MemoryOwnerDirectory, OwnerDirectory, PgOwnerDirectory};
pub use password::PasswordHasher;
pub use registry::{MemoryTokenRegistry, PgTokenRegistry, TokenRegistry};
pub use service::AuthService;
pub use session::{
    AuthenticatedOwner, IssuedTokens, LogoutOutcome, Provenance, RegistryCleanup,
    RotationCoordinator, SessionAuthenticator, SessionManager, TokenIssuer,
};
