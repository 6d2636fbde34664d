//! Password hashing and verification using Argon2id.
use crate::error::{AppError, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

/// Hash a password with a per-password random salt. Returns a PHC-formatted
/// string safe for database storage.
fn hash_sync(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {e}")))?
        .to_string();

    Ok(password_hash)
}

/// Verify a password against its stored hash.
fn verify_sync(password: &str, password_hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| AppError::Internal(format!("Invalid password hash format: {e}")))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(AppError::Internal(format!(
            "Password verification failed: {e}"
        ))),
    }
}

/// Hash on the blocking thread pool. Argon2 is CPU-bound and takes tens of
/// milliseconds; it must not stall the async executor.
pub async fn hash_password(password: String) -> Result<String> {
    tokio::task::spawn_blocking(move || hash_sync(&password))
        .await
        .map_err(|e| AppError::Internal(format!("Hashing task failed: {e}")))?
}

/// Verify on the blocking thread pool.
pub async fn verify_password(password: String, password_hash: String) -> Result<bool> {
    tokio::task::spawn_blocking(move || verify_sync(&password, &password_hash))
        .await
        .map_err(|e| AppError::Internal(format!("Verification task failed: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_sync("pw123").expect("should hash");
        assert!(verify_sync("pw123", &hash).expect("should verify"));
    }

    #[test]
    fn test_verify_wrong_password() {
        let hash = hash_sync("pw123").expect("should hash");
        assert!(!verify_sync("different", &hash).expect("verification should succeed"));
    }

    #[test]
    fn test_different_hashes_for_same_password() {
        let hash1 = hash_sync("pw123").expect("should hash");
        let hash2 = hash_sync("pw123").expect("should hash");
        // Different salts should produce different hashes
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_hash_is_not_plaintext() {
        let hash = hash_sync("pw123").expect("should hash");
        assert!(!hash.contains("pw123"));
        assert!(hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn test_async_round_trip() {
        let hash = hash_password("pw123".to_string()).await.expect("should hash");
        assert!(verify_password("pw123".to_string(), hash)
            .await
            .expect("should verify"));
    }
}
