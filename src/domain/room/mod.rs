//! Room domain module.
//!
//! Rooms are named channels for messages. Public rooms are enumerable;
//! private rooms are reachable only via their id or invite code, which is
//! the entire access-control model — knowledge of an identifier grants
//! access.

mod invite_code;

pub use invite_code::{InviteCode, INVITE_CODE_ALPHABET, INVITE_CODE_LENGTH};

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, RoomId, Timestamp, ValidationError};

/// Maximum length for a room name.
pub const MAX_ROOM_NAME_LENGTH: usize = 200;

/// Whether a room is enumerable or invite-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomVisibility {
    /// Listed in room enumeration, joinable by id.
    Public,
    /// Never enumerated; reachable only via id or invite code.
    Private,
}

impl RoomVisibility {
    /// Returns true for private rooms.
    pub fn is_private(&self) -> bool {
        matches!(self, RoomVisibility::Private)
    }
}

/// Room aggregate - a named channel for messages.
///
/// # Invariants
///
/// - `invite_code` is present iff `visibility` is `Private`
/// - `name` is non-empty after trimming, at most 200 characters
/// - immutable after creation except invite-code regeneration during
///   creation-time collision retry; destroyed only by explicit delete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Unique numeric identifier, database-assigned.
    id: RoomId,

    /// Display name.
    name: String,

    /// Public or private.
    visibility: RoomVisibility,

    /// Invite code, present for private rooms only.
    invite_code: Option<InviteCode>,

    /// When the room was created.
    created_at: Timestamp,
}

impl Room {
    /// Validate a room name, returning the trimmed form.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the name is empty or whitespace-only
    /// - `InvalidFormat` if the name exceeds the length cap
    pub fn validate_name(name: &str) -> Result<String, DomainError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("name").into());
        }
        if trimmed.len() > MAX_ROOM_NAME_LENGTH {
            return Err(ValidationError::invalid_format(
                "name",
                format!("must be at most {} characters", MAX_ROOM_NAME_LENGTH),
            )
            .into());
        }
        Ok(trimmed.to_string())
    }

    /// Reconstitute a room from persistence (no validation).
    pub fn reconstitute(
        id: RoomId,
        name: String,
        visibility: RoomVisibility,
        invite_code: Option<InviteCode>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            name,
            visibility,
            invite_code,
            created_at,
        }
    }

    /// Returns the room ID.
    pub fn id(&self) -> RoomId {
        self.id
    }

    /// Returns the room name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the visibility.
    pub fn visibility(&self) -> RoomVisibility {
        self.visibility
    }

    /// Returns true for private rooms.
    pub fn is_private(&self) -> bool {
        self.visibility.is_private()
    }

    /// Returns the invite code, present for private rooms only.
    pub fn invite_code(&self) -> Option<&InviteCode> {
        self.invite_code.as_ref()
    }

    /// Returns when the room was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }
}
