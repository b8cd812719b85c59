//! Password hashing helpers.
//!
//! # Responsibility
//! - Produce and verify salted Argon2 hashes in PHC string format.
//!
//! # Invariants
//! - Hashes are one-way; there is no decode path. This deliberately replaces
//!   the reversible encoding the portal used before.
//! - Every hash gets a fresh random salt.

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Hashing/verification failure. Carries the underlying message only;
/// never the password itself.
#[derive(Debug)]
pub enum PasswordError {
    Hash(String),
    InvalidHashFormat(String),
}

impl Display for PasswordError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hash(message) => write!(f, "failed to hash password: {message}"),
            Self::InvalidHashFormat(message) => {
                write!(f, "stored password hash is malformed: {message}")
            }
        }
    }
}

impl Error for PasswordError {}

/// Hashes a password with Argon2 default parameters and a fresh salt.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut rand::thread_rng());
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| PasswordError::Hash(err.to_string()))?;
    Ok(hash.to_string())
}

/// Verifies a password against a stored PHC hash string.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|err| PasswordError::InvalidHashFormat(err.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::{hash_password, verify_password, PasswordError};

    #[test]
    fn hash_then_verify_accepts_correct_and_rejects_wrong_password() {
        let hash = hash_password("pass1234").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("pass1234", &hash).unwrap());
        assert!(!verify_password("wrongpass", &hash).unwrap());
    }

    #[test]
    fn same_password_hashes_differently_per_salt() {
        let first = hash_password("pass1234").unwrap();
        let second = hash_password("pass1234").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn malformed_stored_hash_is_reported() {
        let err = verify_password("pass1234", "not-a-phc-string").unwrap_err();
        assert!(matches!(err, PasswordError::InvalidHashFormat(_)));
    }
}
