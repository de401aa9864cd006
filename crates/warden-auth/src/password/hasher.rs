//! Argon2id password hashing and verification.

use std::sync::{Arc, OnceLock};

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use warden_core::error::AppError;

/// Handles password hashing and verification using Argon2id.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
    /// Hash checked when no owner matches, created on first use with `params`.
    decoy: Arc<OnceLock<String>>,
}

impl PasswordHasher {
    /// Creates a hasher with the library's recommended cost parameters.
    pub fn new() -> Self {
        Self {
            params: Params::default(),
            decoy: Arc::default(),
        }
    }

    /// Creates a hasher with explicit cost parameters.
    pub fn with_params(
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    ) -> Result<Self, AppError> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| AppError::configuration(format!("Invalid Argon2 parameters: {e}")))?;
        Ok(Self {
            params,
            decoy: Arc::default(),
        })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hashes a plaintext password using Argon2id with a random salt.
    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

        Ok(hash.to_string())
    }

    /// Verifies a plaintext password against a stored Argon2id hash.
    ///
    /// Returns `Ok(true)` if the password matches, `Ok(false)` if not.
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::internal(format!("Invalid password hash format: {e}")))?;

        match self.argon2().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::internal(format!(
                "Password verification failed: {e}"
            ))),
        }
    }

    /// Verifies `password` against `hash`, or against the decoy hash when
    /// there is none. Either way the caller pays one Argon2 verification at
    /// this hasher's cost; a missing hash always yields `Ok(false)`.
    pub fn verify_or_decoy(&self, password: &str, hash: Option<&str>) -> Result<bool, AppError> {
        match hash {
            Some(hash) => self.verify_password(password, hash),
            None => {
                self.verify_password(password, self.decoy_hash()?)?;
                Ok(false)
            }
        }
    }

    fn decoy_hash(&self) -> Result<&str, AppError> {
        if let Some(hash) = self.decoy.get() {
            return Ok(hash.as_str());
        }
        let hash = self.hash_password(SaltString::generate(&mut OsRng).as_str())?;
        Ok(self.decoy.get_or_init(|| hash).as_str())
    }

    #[cfg(test)]
    pub(crate) fn decoy_ready(&self) -> bool {
        self.decoy.get().is_some()
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
