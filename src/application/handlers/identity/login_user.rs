//! LoginUserHandler - Command handler for credential login.

use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::ports::{CredentialHasher, TokenService, UserRepository};

use super::register_user::AuthenticatedSession;

/// Command to log in with username and password.
#[derive(Debug, Clone)]
pub struct LoginUserCommand {
    pub username: String,
    pub password: String,
}

/// Handler for credential login.
pub struct LoginUserHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn CredentialHasher>,
    tokens: Arc<dyn TokenService>,
}

impl LoginUserHandler {
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn CredentialHasher>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }

    /// Verify credentials and issue a session token.
    ///
    /// # Errors
    ///
    /// - `Unauthorized` on a bad username or a bad password; the two are
    ///   indistinguishable to the caller
    pub async fn handle(&self, cmd: LoginUserCommand) -> Result<AuthenticatedSession, DomainError> {
        let rejected = || DomainError::unauthorized("invalid username or password");

        let user = self
            .users
            .find_by_username(cmd.username.trim())
            .await?
            .ok_or_else(rejected)?;

        if !self.hasher.verify(&cmd.password, user.password_hash()).await {
            return Err(rejected());
        }

        let token = self.tokens.issue(user.id())?;
        tracing::info!(user_id = %user.id(), "user logged in");
        Ok(AuthenticatedSession { user, token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::{HmacTokenService, MockCredentialHasher};
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::identity::{RegisterUserCommand, RegisterUserHandler};
    use crate::domain::foundation::ErrorCode;

    async fn setup(store: &Arc<InMemoryStore>) -> LoginUserHandler {
        let hasher = Arc::new(MockCredentialHasher::new());
        let tokens = Arc::new(HmacTokenService::new("test-secret", 3600));
        RegisterUserHandler::new(store.clone(), hasher.clone(), tokens.clone())
            .handle(RegisterUserCommand {
                username: "ada".into(),
                password: "hunter2".into(),
                display_color: None,
            })
            .await
            .unwrap();
        LoginUserHandler::new(store.clone(), hasher, tokens)
    }

    #[tokio::test]
    async fn valid_credentials_issue_a_token() {
        let store = Arc::new(InMemoryStore::new());
        let session = setup(&store)
            .await
            .handle(LoginUserCommand {
                username: "ada".into(),
                password: "hunter2".into(),
            })
            .await
            .unwrap();
        assert_eq!(session.user.username(), "ada");
        assert!(!session.token.is_empty());
    }

    #[tokio::test]
    async fn bad_password_and_bad_username_look_identical() {
        let store = Arc::new(InMemoryStore::new());
        let login = setup(&store).await;

        let bad_password = login
            .handle(LoginUserCommand {
                username: "ada".into(),
                password: "wrong".into(),
            })
            .await
            .unwrap_err();
        let bad_username = login
            .handle(LoginUserCommand {
                username: "nobody".into(),
                password: "hunter2".into(),
            })
            .await
            .unwrap_err();

        assert_eq!(bad_password.code(), ErrorCode::Unauthorized);
        assert_eq!(bad_username.code(), ErrorCode::Unauthorized);
        assert_eq!(bad_password.message, bad_username.message);
    }
}
