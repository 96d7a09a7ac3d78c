//! GetHistoryHandler - Query handler for room message history.
//!
//! Display-field policy (uniform): entries with a live author record
//! render the author's *current* username and color; anonymous entries
//! render their frozen at-send values because there is no record to
//! consult. An author id whose user row has vanished degrades to the
//! frozen snapshot.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, RoomId, UserId};
use crate::domain::message::Message;
use crate::ports::{MessageRepository, RoomRepository, UserRepository};

/// One history entry with its resolved display fields.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub message: Message,
    /// Resolved display name (current for live authors, frozen otherwise).
    pub username: String,
    /// Resolved display color.
    pub color: String,
}

/// Handler for history fetches.
pub struct GetHistoryHandler {
    rooms: Arc<dyn RoomRepository>,
    messages: Arc<dyn MessageRepository>,
    users: Arc<dyn UserRepository>,
}

impl GetHistoryHandler {
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        messages: Arc<dyn MessageRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            rooms,
            messages,
            users,
        }
    }

    /// Fetch a room's history, oldest first.
    ///
    /// # Errors
    ///
    /// - `RoomNotFound` if the room doesn't exist
    pub async fn handle(&self, room_id: RoomId) -> Result<Vec<HistoryEntry>, DomainError> {
        if self.rooms.find_by_id(room_id).await?.is_none() {
            return Err(DomainError::room_not_found(room_id));
        }

        let messages = self.messages.list_by_room(room_id).await?;

        let mut author_ids: Vec<UserId> = messages.iter().filter_map(Message::author_id).collect();
        author_ids.sort_unstable_by_key(|id| *id.as_uuid());
        author_ids.dedup();

        let authors = self.users.find_by_ids(&author_ids).await?;

        let entries = messages
            .into_iter()
            .map(|message| {
                let live = message
                    .author_id()
                    .and_then(|id| authors.iter().find(|u| u.id() == id));
                let (username, color) = match live {
                    Some(user) => (user.username().to_string(), user.display_color().to_string()),
                    None => (
                        message.display_name().to_string(),
                        message.display_color().to_string(),
                    ),
                };
                HistoryEntry {
                    message,
                    username,
                    color,
                }
            })
            .collect();

        Ok(entries)
    }
}
