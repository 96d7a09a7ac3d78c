//! Session token port.
//!
//! Issues and validates the signed, time-limited session credentials that
//! the identity resolver turns into authenticated users.

use crate::domain::foundation::{DomainError, UserId};

/// Issues and validates signed session tokens.
pub trait TokenService: Send + Sync {
    /// Issue a signed, expiring token for a user.
    ///
    /// # Errors
    ///
    /// - `InternalError` if signing fails
    fn issue(&self, user_id: UserId) -> Result<String, DomainError>;

    /// Validate a token and extract the user id it references.
    ///
    /// Any failure — malformed, expired, signature mismatch — yields
    /// `None`, never an error. Whether the referenced user still exists is
    /// the identity resolver's concern, not this port's.
    fn validate(&self, token: &str) -> Option<UserId>;
}
