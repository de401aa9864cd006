//! Scheduled maintenance for the Warden token registry.
//!
//! The only periodic task is the expired-record sweep. It is storage
//! hygiene; token validity never depends on it running.

pub mod scheduler;

pub use scheduler::CronScheduler;
