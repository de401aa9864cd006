//! # warden-database
//!
//! The registry store pool with its embedded schema, and repositories for
//! the token registry and owner tables.

pub mod pool;
pub mod repositories;

pub use pool::RegistryPool;
