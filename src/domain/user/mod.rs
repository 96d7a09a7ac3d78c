//! User domain module.
//!
//! Registered users carry a unique username, an opaque password hash
//! produced by the credential-hashing collaborator, and a display color.
//! Users are created at registration, mutated by identity updates, and
//! never deleted by this core.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, Timestamp, UserId, ValidationError};

/// Maximum length for a username.
pub const MAX_USERNAME_LENGTH: usize = 60;

/// Display color applied when an actor declares none.
pub const DEFAULT_DISPLAY_COLOR: &str = "#000000";

/// Registered user account.
///
/// # Invariants
///
/// - `username` is unique, non-empty after trimming
/// - `password_hash` is opaque to this core
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier.
    id: UserId,

    /// Unique login name, also the display name for the user's messages.
    username: String,

    /// Opaque hash from the CredentialHasher port. Never serialized out.
    #[serde(skip_serializing)]
    password_hash: String,

    /// Preferred display color (CSS color string).
    display_color: String,

    /// When the account was created.
    created_at: Timestamp,
}

impl User {
    /// Create a new user with a validated username.
    ///
    /// # Errors
    ///
    /// - `EmptyField` / `InvalidFormat` on a bad username
    pub fn new(
        username: &str,
        password_hash: String,
        display_color: Option<String>,
    ) -> Result<Self, DomainError> {
        let username = Self::validate_username(username)?;
        Ok(Self {
            id: UserId::new(),
            username,
            password_hash,
            display_color: normalize_color(display_color),
            created_at: Timestamp::now(),
        })
    }

    /// Reconstitute a user from persistence (no validation).
    pub fn reconstitute(
        id: UserId,
        username: String,
        password_hash: String,
        display_color: String,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            username,
            password_hash,
            display_color,
            created_at,
        }
    }

    /// Validate a username, returning the trimmed form.
    pub fn validate_username(username: &str) -> Result<String, DomainError> {
        let trimmed = username.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("username").into());
        }
        if trimmed.len() > MAX_USERNAME_LENGTH {
            return Err(ValidationError::invalid_format(
                "username",
                format!("must be at most {} characters", MAX_USERNAME_LENGTH),
            )
            .into());
        }
        Ok(trimmed.to_string())
    }

    /// Replace the display color (identity-update operation).
    pub fn set_display_color(&mut self, color: Option<String>) {
        self.display_color = normalize_color(color);
    }

    /// Returns the user ID.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Returns the username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the opaque password hash.
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    /// Returns the display color.
    pub fn display_color(&self) -> &str {
        &self.display_color
    }

    /// Returns when the account was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }
}

/// Normalize a client-declared display color, falling back to the default.
pub fn normalize_color(color: Option<String>) -> String {
    match color {
        Some(c) if !c.trim().is_empty() => c.trim().to_string(),
        _ => DEFAULT_DISPLAY_COLOR.to_string(),
    }
}
