//! Mock credential hasher for tests.
//!
//! Produces a reversible marker "hash" so tests stay fast and assertable
//! without Argon2's cost.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::ports::CredentialHasher;

/// Test hasher: `hash(p)` = `"mock$" + p`.
#[derive(Default)]
pub struct MockCredentialHasher;

impl MockCredentialHasher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CredentialHasher for MockCredentialHasher {
    async fn hash(&self, password: &str) -> Result<String, DomainError> {
        Ok(format!("mock${}", password))
    }

    async fn verify(&self, password: &str, hash: &str) -> bool {
        hash.strip_prefix("mock$") == Some(password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_round_trips() {
        let hasher = MockCredentialHasher::new();
        let hash = hasher.hash("pw").await.unwrap();
        assert!(hasher.verify("pw", &hash).await);
        assert!(!hasher.verify("other", &hash).await);
    }
}
