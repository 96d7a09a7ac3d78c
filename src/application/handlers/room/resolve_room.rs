//! ResolveRoomHandler - Query handler resolving a room id or invite code.

use std::sync::Arc;

use crate::application::handlers::visited::RecordVisitHandler;
use crate::domain::foundation::{DomainError, RoomId, UserId};
use crate::domain::room::{InviteCode, Room};
use crate::ports::{RoomRepository, VisitedRoomRepository};

/// Query to resolve a single identifier as a room id or an invite code.
#[derive(Debug, Clone)]
pub struct ResolveRoomQuery {
    /// Accepted as either a numeric room id or an invite code. The two
    /// formats are disjoint, so the input matches at most one space.
    pub id_or_code: String,
    /// The authenticated caller, if any.
    pub user_id: Option<UserId>,
}

/// Result of a successful resolve.
#[derive(Debug, Clone)]
pub struct ResolvedRoom {
    /// The resolved room.
    pub room: Room,
    /// The caller's visited private rooms. Populated only when the caller
    /// is authenticated and the resolved room is private; its presence
    /// also signals that the visit was just recorded.
    pub visited_rooms: Option<Vec<Room>>,
}

/// Handler for room resolution.
pub struct ResolveRoomHandler {
    rooms: Arc<dyn RoomRepository>,
    visited: Arc<dyn VisitedRoomRepository>,
    record_visit: RecordVisitHandler,
}

impl ResolveRoomHandler {
    pub fn new(rooms: Arc<dyn RoomRepository>, visited: Arc<dyn VisitedRoomRepository>) -> Self {
        Self {
            record_visit: RecordVisitHandler::new(rooms.clone(), visited.clone()),
            rooms,
            visited,
        }
    }

    /// Resolve an identifier, recording a private-room visit for
    /// authenticated callers.
    ///
    /// # Errors
    ///
    /// - `RoomNotFound` if the input matches neither identifier space or
    ///   the room doesn't exist
    pub async fn handle(&self, query: ResolveRoomQuery) -> Result<ResolvedRoom, DomainError> {
        let room = self.lookup(&query.id_or_code).await?;

        let visited_rooms = match (room.is_private(), query.user_id) {
            (true, Some(user_id)) => {
                self.record_visit.handle(user_id, room.id()).await?;
                Some(super::super::visited::collect_visited_rooms(
                    self.rooms.as_ref(),
                    self.visited.as_ref(),
                    user_id,
                )
                .await?)
            }
            _ => None,
        };

        Ok(ResolvedRoom {
            room,
            visited_rooms,
        })
    }

    async fn lookup(&self, id_or_code: &str) -> Result<Room, DomainError> {
        if let Ok(id) = id_or_code.parse::<RoomId>() {
            return self
                .rooms
                .find_by_id(id)
                .await?
                .ok_or_else(|| DomainError::room_not_found(id));
        }
        if let Ok(code) = InviteCode::parse(id_or_code) {
            return self
                .rooms
                .find_by_invite_code(&code)
                .await?
                .ok_or_else(|| DomainError::room_not_found(&code));
        }
        Err(DomainError::room_not_found(id_or_code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryStore;
    use crate::application::handlers::room::{CreateRoomCommand, CreateRoomHandler};
    use crate::domain::foundation::ErrorCode;
    use crate::domain::room::RoomVisibility;

    async fn create_room(store: &Arc<InMemoryStore>, name: &str, visibility: RoomVisibility) -> Room {
        CreateRoomHandler::new(store.clone())
            .handle(CreateRoomCommand {
                name: name.into(),
                visibility,
            })
            .await
            .unwrap()
    }

    fn handler(store: &Arc<InMemoryStore>) -> ResolveRoomHandler {
        ResolveRoomHandler::new(store.clone(), store.clone())
    }

    #[tokio::test]
    async fn resolves_by_numeric_id() {
        let store = Arc::new(InMemoryStore::new());
        let room = create_room(&store, "lounge", RoomVisibility::Public).await;

        let resolved = handler(&store)
            .handle(ResolveRoomQuery {
                id_or_code: room.id().to_string(),
                user_id: None,
            })
            .await
            .unwrap();

        assert_eq!(resolved.room, room);
        assert!(resolved.visited_rooms.is_none());
    }

    #[tokio::test]
    async fn invite_code_and_id_resolve_the_same_room() {
        let store = Arc::new(InMemoryStore::new());
        let room = create_room(&store, "Team", RoomVisibility::Private).await;
        let code = room.invite_code().unwrap().to_string();
        let h = handler(&store);

        let by_code = h
            .handle(ResolveRoomQuery {
                id_or_code: code,
                user_id: None,
            })
            .await
            .unwrap();
        let by_id = h
            .handle(ResolveRoomQuery {
                id_or_code: room.id().to_string(),
                user_id: None,
            })
            .await
            .unwrap();

        assert_eq!(by_code.room, by_id.room);
    }

    #[tokio::test]
    async fn unknown_identifier_is_not_found() {
        let store = Arc::new(InMemoryStore::new());
        let err = handler(&store)
            .handle(ResolveRoomQuery {
                id_or_code: "9999".into(),
                user_id: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::RoomNotFound);
    }

    #[tokio::test]
    async fn authenticated_private_resolve_records_the_visit() {
        let store = Arc::new(InMemoryStore::new());
        let room = create_room(&store, "Team", RoomVisibility::Private).await;
        let user_id = UserId::new();

        let resolved = handler(&store)
            .handle(ResolveRoomQuery {
                id_or_code: room.id().to_string(),
                user_id: Some(user_id),
            })
            .await
            .unwrap();

        let visited = resolved.visited_rooms.expect("visit must be recorded");
        assert_eq!(visited.len(), 1);
        assert_eq!(visited[0].id(), room.id());
    }

    #[tokio::test]
    async fn public_resolve_never_records_a_visit() {
        let store = Arc::new(InMemoryStore::new());
        let room = create_room(&store, "lounge", RoomVisibility::Public).await;
        let user_id = UserId::new();

        let resolved = handler(&store)
            .handle(ResolveRoomQuery {
                id_or_code: room.id().to_string(),
                user_id: Some(user_id),
            })
            .await
            .unwrap();

        assert!(resolved.visited_rooms.is_none());
        assert!(crate::ports::VisitedRoomRepository::list(store.as_ref(), user_id)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn repeated_private_resolves_keep_one_visit_entry() {
        let store = Arc::new(InMemoryStore::new());
        let room = create_room(&store, "Team", RoomVisibility::Private).await;
        let user_id = UserId::new();
        let h = handler(&store);

        for _ in 0..2 {
            h.handle(ResolveRoomQuery {
                id_or_code: room.id().to_string(),
                user_id: Some(user_id),
            })
            .await
            .unwrap();
        }

        assert_eq!(
            crate::ports::VisitedRoomRepository::list(store.as_ref(), user_id)
                .await
                .unwrap(),
            vec![room.id()]
        );
    }
}
