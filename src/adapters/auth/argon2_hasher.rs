//! Argon2 implementation of the credential hasher port.
//!
//! The hash string is opaque to the rest of the core; only this adapter
//! knows it is PHC-formatted Argon2id.

use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::CredentialHasher;

/// Argon2id credential hasher with default parameters.
#[derive(Default)]
pub struct Argon2CredentialHasher;

impl Argon2CredentialHasher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CredentialHasher for Argon2CredentialHasher {
    async fn hash(&self, password: &str) -> Result<String, DomainError> {
        let password = password.as_bytes().to_vec();
        // Argon2 is deliberately expensive; keep it off the async workers.
        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            Argon2::default()
                .hash_password(&password, &salt)
                .map(|hash| hash.to_string())
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::InternalError,
                        format!("Failed to hash password: {}", e),
                    )
                })
        })
        .await
        .map_err(|e| DomainError::new(ErrorCode::InternalError, format!("Hash task failed: {}", e)))?
    }

    async fn verify(&self, password: &str, hash: &str) -> bool {
        let password = password.as_bytes().to_vec();
        let hash = hash.to_string();
        tokio::task::spawn_blocking(move || {
            let Ok(parsed) = PasswordHash::new(&hash) else {
                return false;
            };
            Argon2::default()
                .verify_password(&password, &parsed)
                .is_ok()
        })
        .await
        .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_then_verify_round_trips() {
        let hasher = Argon2CredentialHasher::new();
        let hash = hasher.hash("hunter2").await.unwrap();
        assert!(hasher.verify("hunter2", &hash).await);
        assert!(!hasher.verify("wrong", &hash).await);
    }

    #[tokio::test]
    async fn malformed_stored_hash_verifies_false() {
        let hasher = Argon2CredentialHasher::new();
        assert!(!hasher.verify("hunter2", "not-a-phc-hash").await);
    }
}
