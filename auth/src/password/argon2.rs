use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;

use super::errors::PasswordError;

/// Password hashing implementation.
///
/// Provides salted one-way hashing of credentials (internally uses Argon2id).
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher;

impl PasswordHasher {
    /// Create a new password hasher instance.
    ///
    /// # Returns
    /// PasswordHasher instance configured with secure defaults
    pub fn new() -> Self {
        Self
    }

    /// Hash a plaintext password securely.
    ///
    /// A fresh random salt is generated on every call, so hashing the same
    /// password twice yields two different digests.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// The digest comparison is constant-time (delegated to `argon2`).
    /// A malformed stored hash never matches.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored password hash in PHC string format
    ///
    /// # Returns
    /// True if password matches, false otherwise
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(hash) else {
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
