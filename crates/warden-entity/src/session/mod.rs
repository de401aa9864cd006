//! Session views over the token registry.

pub mod summary;

pub use summary::SessionSummary;
