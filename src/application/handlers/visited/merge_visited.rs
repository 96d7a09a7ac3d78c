//! MergeVisitedHandler - Command handler folding an anonymously-collected
//! visited-room list into an account.
//!
//! Used exactly once per login or registration: the client holds the list
//! it accumulated while anonymous, posts it here, and clears it only
//! after a successful merge.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, RoomId, UserId};
use crate::ports::{RoomRepository, VisitedRoomRepository};

/// Command to merge a client-held visited-room list into an account.
#[derive(Debug, Clone)]
pub struct MergeVisitedCommand {
    /// The authenticated account receiving the merge.
    pub user_id: UserId,
    /// Client-held room ids; duplicates, public rooms, and unknown ids
    /// are absorbed or skipped silently.
    pub room_ids: Vec<RoomId>,
}

/// Handler for the visited-room batch merge.
pub struct MergeVisitedHandler {
    rooms: Arc<dyn RoomRepository>,
    visited: Arc<dyn VisitedRoomRepository>,
}

impl MergeVisitedHandler {
    pub fn new(rooms: Arc<dyn RoomRepository>, visited: Arc<dyn VisitedRoomRepository>) -> Self {
        Self { rooms, visited }
    }

    /// Merge with set-union semantics.
    ///
    /// Returns the number of rows actually inserted; duplicates within
    /// the input or against existing rows do not count.
    pub async fn handle(&self, cmd: MergeVisitedCommand) -> Result<u64, DomainError> {
        let mut keep: Vec<RoomId> = Vec::with_capacity(cmd.room_ids.len());
        for room_id in cmd.room_ids {
            if keep.contains(&room_id) {
                continue;
            }
            // Only live private rooms may enter the visited set.
            match self.rooms.find_by_id(room_id).await? {
                Some(room) if room.is_private() => keep.push(room_id),
                _ => {}
            }
        }

        if keep.is_empty() {
            return Ok(0);
        }

        let merged = self.visited.insert_many(cmd.user_id, &keep).await?;
        tracing::info!(user_id = %cmd.user_id, merged, "visited rooms merged");
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::room::{CreateRoomCommand, CreateRoomHandler};
    use crate::domain::room::RoomVisibility;

    async fn room(store: &Arc<InMemoryStore>, name: &str, visibility: RoomVisibility) -> RoomId {
        CreateRoomHandler::new(store.clone())
            .handle(CreateRoomCommand {
                name: name.into(),
                visibility,
            })
            .await
            .unwrap()
            .id()
    }

    #[tokio::test]
    async fn merge_deduplicates_input() {
        let store = Arc::new(InMemoryStore::new());
        let r1 = room(&store, "r1", RoomVisibility::Private).await;
        let r2 = room(&store, "r2", RoomVisibility::Private).await;
        let user_id = UserId::new();

        let merged = MergeVisitedHandler::new(store.clone(), store.clone())
            .handle(MergeVisitedCommand {
                user_id,
                room_ids: vec![r1, r2, r1],
            })
            .await
            .unwrap();

        assert_eq!(merged, 2);
        let mut listed = VisitedRoomRepository::list(store.as_ref(), user_id)
            .await
            .unwrap();
        listed.sort();
        assert_eq!(listed, vec![r1, r2]);
    }

    #[tokio::test]
    async fn merge_is_idempotent_against_existing_rows() {
        let store = Arc::new(InMemoryStore::new());
        let r1 = room(&store, "r1", RoomVisibility::Private).await;
        let user_id = UserId::new();
        let handler = MergeVisitedHandler::new(store.clone(), store.clone());

        let first = handler
            .handle(MergeVisitedCommand {
                user_id,
                room_ids: vec![r1],
            })
            .await
            .unwrap();
        let second = handler
            .handle(MergeVisitedCommand {
                user_id,
                room_ids: vec![r1],
            })
            .await
            .unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 0);
    }

    #[tokio::test]
    async fn public_and_unknown_rooms_are_skipped_silently() {
        let store = Arc::new(InMemoryStore::new());
        let public = room(&store, "pub", RoomVisibility::Public).await;
        let private = room(&store, "priv", RoomVisibility::Private).await;
        let user_id = UserId::new();

        let merged = MergeVisitedHandler::new(store.clone(), store.clone())
            .handle(MergeVisitedCommand {
                user_id,
                room_ids: vec![public, private, RoomId::from_i64(4040)],
            })
            .await
            .unwrap();

        assert_eq!(merged, 1);
        assert_eq!(
            VisitedRoomRepository::list(store.as_ref(), user_id)
                .await
                .unwrap(),
            vec![private]
        );
    }
}
