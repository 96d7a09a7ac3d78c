//! WebSocket wire protocol for the live messaging channel.
//!
//! Defines the JSON frames exchanged with connected clients:
//! - Client → Server: join/leave a room, send a message
//! - Server → Client: fanned-out messages, errors
//!
//! Frames are tagged with a `type` field; payload fields use camelCase.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{RoomId, UserId};
use crate::domain::message::Message;

// ============================================
// Client → Server Frames
// ============================================

/// All frame types a client may send.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientFrame {
    /// Subscribe to a room's live channel.
    #[serde(rename_all = "camelCase")]
    Join { room_id: RoomId },

    /// Drop the subscription to a room.
    #[serde(rename_all = "camelCase")]
    Leave { room_id: RoomId },

    /// Send a message to a room.
    #[serde(rename_all = "camelCase")]
    Message {
        room_id: RoomId,
        /// Self-declared display name; ignored for authenticated senders.
        #[serde(default)]
        username: Option<String>,
        /// Self-declared display color; ignored for authenticated senders.
        #[serde(default)]
        color: Option<String>,
        #[serde(default)]
        text: Option<String>,
        #[serde(default)]
        image_ref: Option<String>,
        /// Claimed account id. Never trusted as-is; the server re-verifies
        /// it before attributing the message.
        #[serde(default)]
        author_id: Option<UserId>,
    },
}

// ============================================
// Server → Client Frames
// ============================================

/// All frame types the server may send.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerFrame {
    /// A message delivered to a room the client has joined.
    Message(MessageFrame),

    /// An error scoped to this connection. The connection stays open.
    Error(ErrorFrame),
}

/// Wire form of a delivered message.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageFrame {
    pub room_id: RoomId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    /// Human-readable send time (HH:MM:SS), assigned by the server.
    pub time: String,
    pub username: String,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<UserId>,
}

impl MessageFrame {
    pub fn from_message(message: &Message) -> Self {
        Self {
            room_id: message.room_id(),
            text: message.content().text().map(str::to_owned),
            image_ref: message.content().image_ref().map(str::to_owned),
            time: message.created_at().display_time(),
            username: message.display_name().to_owned(),
            color: message.display_color().to_owned(),
            author_id: message.author_id(),
        }
    }
}

/// Error frame sent to the offending connection only.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorFrame {
    pub code: String,
    pub message: String,
}

impl ServerFrame {
    pub fn message(message: &Message) -> Self {
        Self::Message(MessageFrame::from_message(message))
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Error(ErrorFrame {
            code: code.into(),
            message: message.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::message::{Actor, MessageContent};

    #[test]
    fn join_frame_deserializes() {
        let json = r#"{"type": "join", "roomId": 17}"#;
        let frame: ClientFrame = serde_json::from_str(json).unwrap();
        assert!(matches!(frame, ClientFrame::Join { room_id } if room_id == RoomId::from_i64(17)));
    }

    #[test]
    fn message_frame_deserializes_with_optional_fields_absent() {
        let json = r#"{"type": "message", "roomId": 1, "text": "hi"}"#;
        let frame: ClientFrame = serde_json::from_str(json).unwrap();
        match frame {
            ClientFrame::Message {
                room_id,
                username,
                text,
                author_id,
                ..
            } => {
                assert_eq!(room_id, RoomId::from_i64(1));
                assert_eq!(username, None);
                assert_eq!(text.as_deref(), Some("hi"));
                assert_eq!(author_id, None);
            }
            other => panic!("unexpected frame: {:?}", other),
        }
    }

    #[test]
    fn message_frame_deserializes_with_image_ref() {
        let json = r#"{"type": "message", "roomId": 1, "imageRef": "/uploads/a.png", "username": "drifter"}"#;
        let frame: ClientFrame = serde_json::from_str(json).unwrap();
        match frame {
            ClientFrame::Message {
                image_ref, text, ..
            } => {
                assert_eq!(image_ref.as_deref(), Some("/uploads/a.png"));
                assert_eq!(text, None);
            }
            other => panic!("unexpected frame: {:?}", other),
        }
    }

    #[test]
    fn server_message_frame_serializes_with_type_tag_and_time() {
        let actor = Actor::anonymous(Some("drifter".into()), None);
        let content = MessageContent::new(Some("hello".into()), None).unwrap();
        let message = Message::new(RoomId::from_i64(5), &actor, content);

        let json = serde_json::to_string(&ServerFrame::message(&message)).unwrap();
        assert!(json.contains(r#""type":"message""#));
        assert!(json.contains(r#""roomId":5"#));
        assert!(json.contains(r#""username":"drifter""#));
        assert!(json.contains(r#""time":""#));
        // Anonymous messages omit the author id entirely.
        assert!(!json.contains("authorId"));
    }

    #[test]
    fn error_frame_serializes_with_stable_code() {
        let json = serde_json::to_string(&ServerFrame::error("ROOM_NOT_FOUND", "No such room"))
            .unwrap();
        assert!(json.contains(r#""type":"error""#));
        assert!(json.contains(r#""code":"ROOM_NOT_FOUND""#));
    }
}
