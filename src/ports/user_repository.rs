//! User repository port.

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::User;
use async_trait::async_trait;

/// Repository port for user account persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user.
    ///
    /// # Errors
    ///
    /// - `Conflict` if the username is already taken
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, user: &User) -> Result<(), DomainError>;

    /// Update an existing user (identity-update operations).
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the user doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, user: &User) -> Result<(), DomainError>;

    /// Find a user by id.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// Find a user by username.
    ///
    /// Returns `None` if not found.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    /// Batch-fetch users by id, for display-field resolution on history
    /// reads. Missing ids are silently absent from the result.
    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, DomainError>;
}
