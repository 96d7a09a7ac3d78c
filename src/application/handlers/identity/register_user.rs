//! RegisterUserHandler - Command handler for account registration.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ValidationError};
use crate::domain::user::User;
use crate::ports::{CredentialHasher, TokenService, UserRepository};

/// Command to register a new account.
#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
    pub username: String,
    pub password: String,
    pub display_color: Option<String>,
}

/// Result of registration or login: the account plus a fresh session token.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    pub user: User,
    pub token: String,
}

/// Handler for account registration.
pub struct RegisterUserHandler {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn CredentialHasher>,
    tokens: Arc<dyn TokenService>,
}

impl RegisterUserHandler {
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

    /// Register an account and issue its first session token.
    ///
    /// # Errors
    ///
    /// - `EmptyField`/`InvalidFormat` on bad username or empty password
    /// - `Conflict` if the username is taken
    pub async fn handle(&self, cmd: RegisterUserCommand) -> Result<AuthenticatedSession, DomainError> {
        if cmd.password.is_empty() {
            return Err(ValidationError::empty_field("password").into());
        }

        let password_hash = self.hasher.hash(&cmd.password).await?;
        let user = User::new(&cmd.username, password_hash, cmd.display_color)?;
        self.users.insert(&user).await?;
        let token = self.tokens.issue(user.id())?;

        tracing::info!(user_id = %user.id(), "user registered");
        Ok(AuthenticatedSession { user, token })
    }
}
