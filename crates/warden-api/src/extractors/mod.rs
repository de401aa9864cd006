//! Custom request extractors.

pub mod auth;
pub mod client;

pub use auth::AuthOwner;
pub use client::ClientInfo;
