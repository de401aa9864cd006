//! # warden-entity
//!
//! Domain records for Warden. Every struct in this crate is either a
//! database row or a value object derived from one. Row types derive
//! `sqlx::FromRow` in addition to `Debug`, `Clone`, `Serialize`, and
//! `Deserialize`.

pub mod owner;
pub mod session;
pub mod token;
