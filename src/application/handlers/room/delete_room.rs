//! DeleteRoomHandler - Command handler for room deletion.
//!
//! Room deletion is the sole irreversible operation in the core and is
//! all-or-nothing: the room, its messages, and its visited-room rows go
//! in one atomic unit owned by the repository.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, RoomId};
use crate::ports::RoomRepository;

/// Handler for room deletion.
pub struct DeleteRoomHandler {
    rooms: Arc<dyn RoomRepository>,
}

impl DeleteRoomHandler {
    pub fn new(rooms: Arc<dyn RoomRepository>) -> Self {
        Self { rooms }
    }

    /// Delete a room and everything that hangs off it.
    ///
    /// # Errors
    ///
    /// - `RoomNotFound` if the room doesn't exist
    /// - `DatabaseError` on persistence failure (nothing is deleted)
    pub async fn handle(&self, room_id: RoomId) -> Result<(), DomainError> {
        self.rooms.delete(room_id).await?;
        tracing::info!(room_id = %room_id, "room deleted with cascade");
        Ok(())
    }
}
