//! UpdateIdentityHandler - Command handler for identity updates.
//!
//! Account-scoped mutation: the HTTP boundary fails closed with 401
//! before this handler ever sees an unauthenticated caller.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::User;
use crate::ports::UserRepository;

/// Command to update an account's display fields.
#[derive(Debug, Clone)]
pub struct UpdateIdentityCommand {
    pub user_id: UserId,
    pub display_color: Option<String>,
}

/// Handler for identity updates.
pub struct UpdateIdentityHandler {
    users: Arc<dyn UserRepository>,
}

impl UpdateIdentityHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Apply the update and return the refreshed user.
    ///
    /// # Errors
    ///
    /// - `UserNotFound` if the account no longer exists
    pub async fn handle(&self, cmd: UpdateIdentityCommand) -> Result<User, DomainError> {
        let mut user = self
            .users
            .find_by_id(cmd.user_id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(cmd.user_id))?;

        user.set_display_color(cmd.display_color);
        self.users.update(&user).await?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;

    #[tokio::test]
    async fn update_changes_the_stored_color() {
        let store = Arc::new(InMemoryStore::new());
        let user = User::new("ada", "hash".into(), Some("#111111".into())).unwrap();
        UserRepository::insert(store.as_ref(), &user).await.unwrap();

        let updated = UpdateIdentityHandler::new(store.clone())
            .handle(UpdateIdentityCommand {
                user_id: user.id(),
                display_color: Some("#222222".into()),
            })
            .await
            .unwrap();

        assert_eq!(updated.display_color(), "#222222");
        let stored = UserRepository::find_by_id(store.as_ref(), user.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.display_color(), "#222222");
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let store = Arc::new(InMemoryStore::new());
        let err = UpdateIdentityHandler::new(store.clone())
            .handle(UpdateIdentityCommand {
                user_id: UserId::new(),
                display_color: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), crate::domain::foundation::ErrorCode::UserNotFound);
    }
}
