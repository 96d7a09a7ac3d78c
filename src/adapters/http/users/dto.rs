//! HTTP DTOs for account and visited-room endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::identity::AuthenticatedSession;
use crate::domain::foundation::{RoomId, UserId};
use crate::domain::user::User;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to register an account.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    /// Preferred display color; defaults server-side when absent.
    #[serde(default)]
    pub color: Option<String>,
}

/// Request to log in.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request to update the caller's identity.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIdentityRequest {
    #[serde(default)]
    pub color: Option<String>,
}

/// Request to merge locally-tracked private-room visits into the account.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitRoomsBatchRequest {
    pub room_ids: Vec<RoomId>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// A user as exposed over the API. The password hash never leaves the
/// server.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub username: String,
    pub color: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id(),
            username: user.username().to_string(),
            color: user.display_color().to_string(),
        }
    }
}

/// Response for register and login: the account plus a session token.
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub user: UserResponse,
    pub token: String,
}

impl From<AuthenticatedSession> for SessionResponse {
    fn from(session: AuthenticatedSession) -> Self {
        Self {
            user: UserResponse::from(&session.user),
            token: session.token,
        }
    }
}

/// Response for the visited-rooms merge.
#[derive(Debug, Clone, Serialize)]
pub struct MergeResponse {
    /// Number of visits that were new to the account.
    pub merged: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_response_never_contains_the_password_hash() {
        let user = User::new("ada", "argon2-hash-material".to_string(), None).unwrap();
        let json = serde_json::to_string(&UserResponse::from(&user)).unwrap();
        assert!(!json.contains("argon2-hash-material"));
        assert!(json.contains(r#""username":"ada""#));
    }

    #[test]
    fn visit_batch_request_accepts_numeric_ids() {
        let json = r#"{"roomIds": [3, 17, 42]}"#;
        let request: VisitRoomsBatchRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.room_ids.len(), 3);
    }
}
