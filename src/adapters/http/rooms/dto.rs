//! HTTP DTOs for room endpoints.
//!
//! These types define the JSON request/response structure for the room
//! API. They are the boundary between HTTP and the application layer.

use serde::{Deserialize, Serialize};

use crate::application::handlers::message::HistoryEntry;
use crate::application::handlers::room::RoomPage;
use crate::domain::foundation::UserId;
use crate::domain::room::{Room, RoomVisibility};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to create a room.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRoomRequest {
    pub name: String,
    /// Private rooms are reachable only by id or invite code.
    #[serde(default, alias = "isPrivate")]
    pub is_private: bool,
}

/// Query parameters for the public room listing.
#[derive(Debug, Clone, Deserialize)]
pub struct ListRoomsParams {
    /// 1-based page number; defaults to the first page.
    pub page: Option<u64>,
    /// Page size; defaults to the standard listing size, capped
    /// server-side.
    pub page_size: Option<u64>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// A room as exposed over the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
    pub id: i64,
    pub name: String,
    pub private: bool,
    /// Present for private rooms only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invite_code: Option<String>,
    /// Creation time (ISO 8601).
    pub created_at: String,
}

impl From<&Room> for RoomResponse {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id().as_i64(),
            name: room.name().to_string(),
            private: room.visibility() == RoomVisibility::Private,
            invite_code: room.invite_code().map(|c| c.as_str().to_string()),
            created_at: room.created_at().to_rfc3339(),
        }
    }
}

/// One page of the public room listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomPageResponse {
    pub rooms: Vec<RoomResponse>,
    pub total_pages: u64,
}

impl From<RoomPage> for RoomPageResponse {
    fn from(page: RoomPage) -> Self {
        Self {
            rooms: page.rooms.iter().map(RoomResponse::from).collect(),
            total_pages: page.total_pages,
        }
    }
}

/// Response for room resolution by id or invite code.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveRoomResponse {
    pub room: RoomResponse,
    /// The caller's private-room shortcut list, included only when the
    /// caller is authenticated and the resolved room is private.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visited_private_rooms: Option<Vec<RoomResponse>>,
}

/// A message as exposed in history reads.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    /// Human-readable send time (HH:MM:SS).
    pub time: String,
    pub username: String,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_id: Option<UserId>,
}

impl From<&HistoryEntry> for MessageResponse {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            text: entry.message.content().text().map(str::to_owned),
            image_ref: entry.message.content().image_ref().map(str::to_owned),
            time: entry.message.created_at().display_time(),
            username: entry.username.clone(),
            color: entry.color.clone(),
            author_id: entry.message.author_id(),
        }
    }
}

/// Response for a room history read.
#[derive(Debug, Clone, Serialize)]
pub struct MessagesResponse {
    pub messages: Vec<MessageResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{RoomId, Timestamp};
    use crate::domain::room::InviteCode;

    #[test]
    fn public_room_response_omits_invite_code() {
        let room = Room::reconstitute(
            RoomId::from_i64(1),
            "general".into(),
            RoomVisibility::Public,
            None,
            Timestamp::now(),
        );
        let json = serde_json::to_string(&RoomResponse::from(&room)).unwrap();
        assert!(json.contains(r#""private":false"#));
        assert!(!json.contains("inviteCode"));
    }

    #[test]
    fn private_room_response_carries_invite_code() {
        let code = InviteCode::generate();
        let room = Room::reconstitute(
            RoomId::from_i64(2),
            "hideout".into(),
            RoomVisibility::Private,
            Some(code.clone()),
            Timestamp::now(),
        );
        let json = serde_json::to_string(&RoomResponse::from(&room)).unwrap();
        assert!(json.contains(r#""private":true"#));
        assert!(json.contains(code.as_str()));
    }
}
