// Password hashing and verification utilities using Argon2
// Argon2id with OWASP-recommended parameters, PHC string format

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use thiserror::Error;

/// Errors that can occur during password operations
#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Failed to hash password: {0}")]
    HashingError(String),

    #[error("Failed to verify password: {0}")]
    VerificationError(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

/// Configuration for Argon2 password hashing
pub struct PasswordConfig {
    /// Memory cost in KiB (default: 19456 = 19 MiB)
    pub memory_cost: u32,
    /// Time cost (iterations, default: 2)
    pub time_cost: u32,
    /// Parallelism factor (default: 1)
    pub parallelism: u32,
    /// Output hash length in bytes (default: 32)
    pub output_length: usize,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        // OWASP recommended minimum parameters for Argon2id
        Self {
            memory_cost: 19456,
            time_cost: 2,
            parallelism: 1,
            output_length: 32,
        }
    }
}

impl PasswordConfig {
    fn build_hasher(&self) -> Result<Argon2<'static>, PasswordError> {
        let params = Params::new(
            self.memory_cost,
            self.time_cost,
            self.parallelism,
            Some(self.output_length),
        )
        .map_err(|e| PasswordError::HashingError(e.to_string()))?;

        Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
    }
}

/// Hash a password using Argon2id with secure defaults.
/// Returns the hash in PHC string format, salt included.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let config = PasswordConfig::default();
    let hasher = config.build_hasher()?;

    let salt = SaltString::generate(&mut OsRng);
    let hash = hasher
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashingError(e.to_string()))?;

    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC-format hash
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|_| PasswordError::InvalidHashFormat)?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerificationError(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_never_equals_plaintext() {
        let hash = hash_password("secret123").unwrap();
        assert_ne!(hash, "secret123");
        assert!(hash.starts_with("$argon2id$"));
    }

    #[test]
    fn test_verify_round_trip() {
        let hash = hash_password("secret123").unwrap();
        assert!(verify_password("secret123", &hash).unwrap());
        assert!(!verify_password("wrong-password", &hash).unwrap());
    }

    #[test]
    fn test_same_password_hashes_differently() {
        // Salts are random, so two hashes of one password must differ
        let first = hash_password("secret123").unwrap();
        let second = hash_password("secret123").unwrap();
        assert_ne!(first, second);
        assert!(verify_password("secret123", &first).unwrap());
        assert!(verify_password("secret123", &second).unwrap());
    }

    #[test]
    fn test_invalid_hash_format_is_an_error() {
        assert!(matches!(
            verify_password("secret123", "not-a-phc-string"),
            Err(PasswordError::InvalidHashFormat)
        ));
    }
}
