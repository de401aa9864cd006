//! In-process integration tests for the Warden HTTP API.
//!
//! The router is driven with `tower::ServiceExt::oneshot` over the memory
//! registry and owner directory, so no database is needed.

mod auth_test;
mod helpers;
mod session_test;
