//! Message domain module.
//!
//! Messages are append-only: never mutated or deleted individually,
//! destroyed only via room deletion. Each message records either a live
//! author reference (authenticated sender) or frozen self-declared display
//! fields (anonymous sender).

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, MessageId, RoomId, Timestamp, UserId, ValidationError};
use crate::domain::user::{normalize_color, User};

/// Display name applied when an anonymous actor declares none.
pub const ANONYMOUS_DISPLAY_NAME: &str = "Anonymous";

/// The sender of a message: a verified account or a self-declared identity.
///
/// Anonymous identity is client-declared and unverified by design. It is a
/// deliberate low-stakes trust boundary for display purposes only and is
/// never consulted for authorization decisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Actor {
    /// Verified account; display fields come from the user record.
    Authenticated(User),
    /// Self-declared display identity with no persisted account.
    Anonymous {
        display_name: String,
        display_color: String,
    },
}

impl Actor {
    /// Build an anonymous actor from client-declared fields, applying the
    /// display defaults for empty values.
    pub fn anonymous(display_name: Option<String>, display_color: Option<String>) -> Self {
        let display_name = match display_name {
            Some(n) if !n.trim().is_empty() => n.trim().to_string(),
            _ => ANONYMOUS_DISPLAY_NAME.to_string(),
        };
        Actor::Anonymous {
            display_name,
            display_color: normalize_color(display_color),
        }
    }

    /// Returns the verified user id, if any.
    pub fn user_id(&self) -> Option<UserId> {
        match self {
            Actor::Authenticated(user) => Some(user.id()),
            Actor::Anonymous { .. } => None,
        }
    }

    /// Returns the display name for this actor.
    pub fn display_name(&self) -> &str {
        match self {
            Actor::Authenticated(user) => user.username(),
            Actor::Anonymous { display_name, .. } => display_name,
        }
    }

    /// Returns the display color for this actor.
    pub fn display_color(&self) -> &str {
        match self {
            Actor::Authenticated(user) => user.display_color(),
            Actor::Anonymous { display_color, .. } => display_color,
        }
    }
}

/// Message body: text, an image reference, or both — never neither.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageContent {
    text: Option<String>,
    image_ref: Option<String>,
}

impl MessageContent {
    /// Validate and construct message content.
    ///
    /// Whitespace-only text counts as absent. An image reference alone is
    /// valid content.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if both text and image reference are absent
    pub fn new(text: Option<String>, image_ref: Option<String>) -> Result<Self, DomainError> {
        let text = text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty());
        let image_ref = image_ref.filter(|r| !r.trim().is_empty());
        if text.is_none() && image_ref.is_none() {
            return Err(ValidationError::empty_field("content").into());
        }
        Ok(Self { text, image_ref })
    }

    /// Returns the text portion, if any.
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Returns the image reference, if any.
    pub fn image_ref(&self) -> Option<&str> {
        self.image_ref.as_deref()
    }
}

/// A persisted room message.
///
/// # Invariants
///
/// - `content` holds text and/or an image reference, never neither
/// - `created_at` is server-assigned at persistence time
/// - `author_id` is set iff the sender was authenticated at send time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier.
    id: MessageId,

    /// Room this message belongs to.
    room_id: RoomId,

    /// Verified author, if the sender was authenticated.
    author_id: Option<UserId>,

    /// Display name snapshot taken at send time.
    display_name: String,

    /// Display color snapshot taken at send time.
    display_color: String,

    /// Message body.
    content: MessageContent,

    /// Server-assigned persistence timestamp.
    created_at: Timestamp,
}

impl Message {
    /// Create a new message from an actor and validated content.
    ///
    /// The display fields are snapshotted from the actor at send time; for
    /// account-backed messages the snapshot is a fallback only, since reads
    /// re-resolve the live user record.
    pub fn new(room_id: RoomId, actor: &Actor, content: MessageContent) -> Self {
        Self {
            id: MessageId::new(),
            room_id,
            author_id: actor.user_id(),
            display_name: actor.display_name().to_string(),
            display_color: actor.display_color().to_string(),
            content,
            created_at: Timestamp::now(),
        }
    }

    /// Reconstitute a message from persistence (no validation).
    pub fn reconstitute(
        id: MessageId,
        room_id: RoomId,
        author_id: Option<UserId>,
        display_name: String,
        display_color: String,
        content: MessageContent,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            room_id,
            author_id,
            display_name,
            display_color,
            content,
            created_at,
        }
    }

    /// Returns the message ID.
    pub fn id(&self) -> MessageId {
        self.id
    }

    /// Returns the room ID.
    pub fn room_id(&self) -> RoomId {
        self.room_id
    }

    /// Returns the verified author id, if any.
    pub fn author_id(&self) -> Option<UserId> {
        self.author_id
    }

    /// Returns the display name snapshot.
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the display color snapshot.
    pub fn display_color(&self) -> &str {
        &self.display_color
    }

    /// Returns the message body.
    pub fn content(&self) -> &MessageContent {
        &self.content
    }

    /// Returns the server-assigned timestamp.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    #[test]
    fn content_requires_text_or_image() {
        let err = MessageContent::new(None, None).unwrap_err();
        assert_eq!(err.code(), ErrorCode::EmptyField);
    }

    #[test]
    fn whitespace_text_without_image_is_rejected() {
        let err = MessageContent::new(Some("   ".into()), None).unwrap_err();
        assert_eq!(err.code(), ErrorCode::EmptyField);
    }

    #[test]
    fn image_only_content_is_valid() {
        let content = MessageContent::new(None, Some("/uploads/cat.png".into())).unwrap();
        assert_eq!(content.text(), None);
        assert_eq!(content.image_ref(), Some("/uploads/cat.png"));
    }

    #[test]
    fn anonymous_actor_defaults_empty_fields() {
        let actor = Actor::anonymous(Some("  ".into()), None);
        assert_eq!(actor.display_name(), ANONYMOUS_DISPLAY_NAME);
        assert_eq!(actor.display_color(), "#000000");
        assert_eq!(actor.user_id(), None);
    }

    #[test]
    fn authenticated_actor_snapshots_user_fields() {
        let user = User::new("ada", "hash".into(), Some("#123456".into())).unwrap();
        let actor = Actor::Authenticated(user.clone());
        let content = MessageContent::new(Some("hi".into()), None).unwrap();
        let message = Message::new(RoomId::from_i64(1), &actor, content);

        assert_eq!(message.author_id(), Some(user.id()));
        assert_eq!(message.display_name(), "ada");
        assert_eq!(message.display_color(), "#123456");
    }
}
