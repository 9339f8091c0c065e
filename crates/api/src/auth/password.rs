//! Password rules and Argon2id hashing for dashboard users.
//!
//! Hashes are PHC strings, so the salt and parameters are stored with them.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// Minimum password length, counted in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Password must be at least {} characters long", MIN_PASSWORD_LENGTH)]
    TooShort,

    /// Hashing failed, or the stored hash is not a PHC string.
    #[error("Password hash error: {0}")]
    Hash(argon2::password_hash::Error),
}

impl From<argon2::password_hash::Error> for PasswordError {
    fn from(err: argon2::password_hash::Error) -> Self {
        PasswordError::Hash(err)
    }
}

pub fn check_length(password: &str) -> Result<(), PasswordError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(PasswordError::TooShort);
    }
    Ok(())
}

/// Hash a password that passes [`check_length`].
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    check_length(password)?;
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// `Ok(false)` on a wrong password; `Err` only when `stored` is malformed.
pub fn verify_password(password: &str, stored: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(stored)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn hash_then_verify() {
        let hash = hash_password("φωτογραφία-42").expect("hashing should succeed");
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("φωτογραφία-42", &hash).expect("verify should succeed"));
        assert!(!verify_password("φωτογραφία-43", &hash).expect("verify should succeed"));
    }

    #[test]
    fn short_password_is_not_hashed() {
        assert_matches!(hash_password("1234567"), Err(PasswordError::TooShort));
    }

    #[test]
    fn length_counts_characters() {
        assert!(check_length("12345678").is_ok());
        // Eight characters, fourteen bytes.
        assert!(check_length("κωδικός1").is_ok());
        assert!(check_length("κωδικός").is_err());
    }

    #[test]
    fn malformed_stored_hash_is_an_error() {
        assert_matches!(
            verify_password("anything", "not-a-phc-string"),
            Err(PasswordError::Hash(_))
        );
    }
}
