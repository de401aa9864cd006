//! # warden-api
//!
//! HTTP API layer for Warden built on Axum.
//!
//! Exposes login, refresh, logout, session listing/revocation, profile,
//! and health endpoints over [`warden_auth::AuthService`].

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
