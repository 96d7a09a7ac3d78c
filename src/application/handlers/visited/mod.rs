//! Visited-room tracker handlers: record, merge, list.

mod merge_visited;
mod record_visit;

pub use merge_visited::{MergeVisitedCommand, MergeVisitedHandler};
pub use record_visit::RecordVisitHandler;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::room::Room;
use crate::ports::{RoomRepository, VisitedRoomRepository};
use std::sync::Arc;

/// Resolve a user's visited room ids into live rooms, pruning silently.
///
/// A recorded room may have been deleted since the visit; that is not an
/// error, the entry just disappears from the shortcut list.
pub(crate) async fn collect_visited_rooms(
    rooms: &dyn RoomRepository,
    visited: &dyn VisitedRoomRepository,
    user_id: UserId,
) -> Result<Vec<Room>, DomainError> {
    let ids = visited.list(user_id).await?;
    let mut out = Vec::with_capacity(ids.len());
    for id in ids {
        if let Some(room) = rooms.find_by_id(id).await? {
            out.push(room);
        }
    }
    Ok(out)
}

/// Query handler for the visited private-room shortcut list.
pub struct ListVisitedHandler {
    rooms: Arc<dyn RoomRepository>,
    visited: Arc<dyn VisitedRoomRepository>,
}

impl ListVisitedHandler {
    pub fn new(rooms: Arc<dyn RoomRepository>, visited: Arc<dyn VisitedRoomRepository>) -> Self {
        Self { rooms, visited }
    }

    /// List the user's visited private rooms, deleted ones pruned.
    pub async fn handle(&self, user_id: UserId) -> Result<Vec<Room>, DomainError> {
        collect_visited_rooms(self.rooms.as_ref(), self.visited.as_ref(), user_id).await
    }
}
