//! Token owners (user accounts).

pub mod model;
pub mod status;

pub use model::{CreateOwner, Owner};
pub use status::OwnerStatus;
