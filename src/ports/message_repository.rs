//! Message repository port.
//!
//! Messages are append-only: the contract offers no update or single-row
//! delete. Rows disappear only through the room deletion cascade owned by
//! `RoomRepository::delete`.

use crate::domain::foundation::{DomainError, RoomId};
use crate::domain::message::Message;
use async_trait::async_trait;

/// Repository port for append-only message persistence.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Append a message to its room's history.
    ///
    /// The message's timestamp was assigned by the server at construction
    /// time; relative order within a room follows the store's commit order.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn append(&self, message: &Message) -> Result<(), DomainError>;

    /// Fetch a room's full history, ascending by creation time.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn list_by_room(&self, room_id: RoomId) -> Result<Vec<Message>, DomainError>;
}
