//! Credential hashing port.
//!
//! Password-hash computation is an external collaborator: this core only
//! sees opaque hashes through this narrow interface.

use crate::domain::foundation::DomainError;
use async_trait::async_trait;

/// Hashes and verifies passwords. Hash output is opaque to callers.
#[async_trait]
pub trait CredentialHasher: Send + Sync {
    /// Produce an opaque hash for a password.
    ///
    /// # Errors
    ///
    /// - `InternalError` if hashing fails
    async fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Check a password against a stored hash.
    ///
    /// Malformed stored hashes verify as `false` rather than erroring, so
    /// login failures stay indistinguishable to the caller.
    async fn verify(&self, password: &str, hash: &str) -> bool;
}
