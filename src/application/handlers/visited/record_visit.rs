//! RecordVisitHandler - Command handler recording a private-room visit.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, RoomId, UserId};
use crate::ports::{RoomRepository, VisitedRoomRepository};

/// Handler recording that a user accessed a private room.
pub struct RecordVisitHandler {
    rooms: Arc<dyn RoomRepository>,
    visited: Arc<dyn VisitedRoomRepository>,
}

impl RecordVisitHandler {
    pub fn new(rooms: Arc<dyn RoomRepository>, visited: Arc<dyn VisitedRoomRepository>) -> Self {
        Self { rooms, visited }
    }

    /// Record a visit. Idempotent; visiting a public room is never
    /// tracked and is a silent no-op rather than an error.
    ///
    /// # Errors
    ///
    /// - `RoomNotFound` if the room doesn't exist
    pub async fn handle(&self, user_id: UserId, room_id: RoomId) -> Result<(), DomainError> {
        let room = self
            .rooms
            .find_by_id(room_id)
            .await?
            .ok_or_else(|| DomainError::room_not_found(room_id))?;

        if room.is_private() {
            self.visited.insert(user_id, room_id).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::room::{CreateRoomCommand, CreateRoomHandler};
    use crate::domain::room::RoomVisibility;

    async fn room(store: &Arc<InMemoryStore>, visibility: RoomVisibility) -> RoomId {
        CreateRoomHandler::new(store.clone())
            .handle(CreateRoomCommand {
                name: "room".into(),
                visibility,
            })
            .await
            .unwrap()
            .id()
    }

    #[tokio::test]
    async fn recording_twice_leaves_one_entry() {
        let store = Arc::new(InMemoryStore::new());
        let room_id = room(&store, RoomVisibility::Private).await;
        let user_id = UserId::new();
        let handler = RecordVisitHandler::new(store.clone(), store.clone());

        handler.handle(user_id, room_id).await.unwrap();
        handler.handle(user_id, room_id).await.unwrap();

        assert_eq!(
            VisitedRoomRepository::list(store.as_ref(), user_id)
                .await
                .unwrap(),
            vec![room_id]
        );
    }

    #[tokio::test]
    async fn public_room_visit_is_a_silent_noop() {
        let store = Arc::new(InMemoryStore::new());
        let room_id = room(&store, RoomVisibility::Public).await;
        let user_id = UserId::new();

        RecordVisitHandler::new(store.clone(), store.clone())
            .handle(user_id, room_id)
            .await
            .unwrap();

        assert!(VisitedRoomRepository::list(store.as_ref(), user_id)
            .await
            .unwrap()
            .is_empty());
    }
}
