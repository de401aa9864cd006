//! Password hashing for the bundled owner directories.

pub mod hasher;

pub use hasher::PasswordHasher;
