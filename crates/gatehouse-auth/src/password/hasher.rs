//! Argon2id password hashing and verification.

use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use crate::error::AuthError;

/// Handles password hashing and verification using Argon2id.
#[derive(Debug, Clone)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Creates a new password hasher instance.
    pub fn new() -> Self {
        Self
    }

    /// Hashes a plaintext secret using Argon2id with a random salt.
    ///
    /// Used on the credential creation/rotation path; the login hot path only
    /// verifies.
    pub fn hash(&self, secret: &str) -> Result<String, AuthError> {
        if secret.is_empty() {
            return Err(AuthError::EmptySecret);
        }

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(secret.as_bytes(), &salt)
            .map_err(|_| AuthError::PasswordMismatch)?;

        Ok(hash.to_string())
    }

    /// Verifies a candidate secret against a stored Argon2id hash.
    ///
    /// An empty `stored_hash` means no password was ever configured and is
    /// reported as [`AuthError::NoPasswordHash`] so an unset hash can never
    /// verify by accident. Malformed hash encodings and wrong passwords both
    /// surface as [`AuthError::PasswordMismatch`]. The candidate secret is
    /// never logged or echoed back.
    pub fn verify(&self, stored_hash: &str, candidate: &str) -> Result<(), AuthError> {
        if stored_hash.is_empty() {
            return Err(AuthError::NoPasswordHash);
        }

        let parsed_hash =
            PasswordHash::new(stored_hash).map_err(|_| AuthError::PasswordMismatch)?;

        Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed_hash)
            .map_err(|_| AuthError::PasswordMismatch)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
