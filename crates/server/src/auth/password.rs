//! Password hashing with Argon2

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Hash a password using Argon2id with a fresh random salt.
/// Two calls with the same plaintext produce different hashes.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::Hashing(e.to_string()))
}

/// Verify a password against a stored hash.
/// The underlying comparison is constant-time regardless of where a
/// mismatch occurs.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| PasswordError::InvalidHash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    Hashing(String),
    #[error("Invalid password hash: {0}")]
    InvalidHash(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = "secret1";
        let hash = hash_password(password).expect("Failed to hash password");

        assert!(verify_password(password, &hash).expect("Verification failed"));
        assert!(!verify_password("wrong_password", &hash).expect("Verification failed"));
    }

    #[test]
    fn test_hashes_are_salted() {
        let password = "secret1";
        let first = hash_password(password).expect("Failed to hash password");
        let second = hash_password(password).expect("Failed to hash password");

        // Fresh salt per call, so the encoded hashes differ
        assert_ne!(first, second);
        assert!(verify_password(password, &first).expect("Verification failed"));
        assert!(verify_password(password, &second).expect("Verification failed"));
    }

    #[test]
    fn test_garbage_hash_is_rejected() {
        assert!(matches!(
            verify_password("secret1", "not-a-phc-string"),
            Err(PasswordError::InvalidHash(_))
        ));
    }
}
