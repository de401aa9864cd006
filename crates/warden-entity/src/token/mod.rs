//! Registered token records.

pub mod kind;
pub mod model;
pub mod state;

pub use kind::TokenKind;
pub use model::{NewRegisteredToken, RegisteredToken, RegistryStats};
pub use state::TokenState;
