//! Token lifecycle: issuance, authentication, rotation, and revocation.

pub mod authenticator;
pub mod cleanup;
pub mod issuer;
pub mod manager;
pub mod rotation;

pub use authenticator::{AuthenticatedOwner, SessionAuthenticator};
pub use cleanup::RegistryCleanup;
pub use issuer::{IssuedTokens, Provenance, TokenIssuer};
pub use manager::{LogoutOutcome, SessionManager};
pub use rotation::RotationCoordinator;
