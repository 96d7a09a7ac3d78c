//! In-memory implementation of the persistence ports.
//!
//! One store implements all four repository traits so the room deletion
//! cascade stays atomic under a single lock, mirroring the transactional
//! behavior of the PostgreSQL adapters. Used by unit tests, integration
//! tests, and local development without a database.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, RoomId, UserId};
use crate::domain::message::Message;
use crate::domain::room::{InviteCode, Room, RoomVisibility};
use crate::domain::user::User;
use crate::ports::{MessageRepository, RoomRepository, UserRepository, VisitedRoomRepository};

#[derive(Default)]
struct StoreInner {
    next_room_id: i64,
    rooms: Vec<Room>,
    messages: Vec<Message>,
    users: HashMap<UserId, User>,
    visited: HashSet<(UserId, RoomId)>,
}

/// In-memory store implementing every persistence port.
#[derive(Default)]
pub struct InMemoryStore {
    inner: Mutex<StoreInner>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of messages held for a room (test inspection).
    pub fn message_count(&self, room_id: RoomId) -> usize {
        self.inner
            .lock()
            .unwrap()
            .messages
            .iter()
            .filter(|m| m.room_id() == room_id)
            .count()
    }
}

#[async_trait]
impl RoomRepository for InMemoryStore {
    async fn insert(
        &self,
        name: &str,
        visibility: RoomVisibility,
        invite_code: Option<&InviteCode>,
    ) -> Result<Room, DomainError> {
        let mut inner = self.inner.lock().unwrap();

        if let Some(code) = invite_code {
            let taken = inner
                .rooms
                .iter()
                .any(|r| r.invite_code() == Some(code));
            if taken {
                return Err(DomainError::new(
                    crate::domain::foundation::ErrorCode::Conflict,
                    format!("Invite code already taken: {}", code),
                ));
            }
        }

        inner.next_room_id += 1;
        let room = Room::reconstitute(
            RoomId::from_i64(inner.next_room_id),
            name.to_string(),
            visibility,
            invite_code.cloned(),
            crate::domain::foundation::Timestamp::now(),
        );
        inner.rooms.push(room.clone());
        Ok(room)
    }

    async fn find_by_id(&self, id: RoomId) -> Result<Option<Room>, DomainError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .rooms
            .iter()
            .find(|r| r.id() == id)
            .cloned())
    }

    async fn find_by_invite_code(&self, code: &InviteCode) -> Result<Option<Room>, DomainError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .rooms
            .iter()
            .find(|r| r.invite_code() == Some(code))
            .cloned())
    }

    async fn list_public(&self, offset: u64, limit: u64) -> Result<(Vec<Room>, u64), DomainError> {
        let inner = self.inner.lock().unwrap();
        let mut public: Vec<Room> = inner
            .rooms
            .iter()
            .filter(|r| !r.is_private())
            .cloned()
            .collect();
        public.sort_by(|a, b| {
            b.created_at()
                .cmp(a.created_at())
                .then(b.id().as_i64().cmp(&a.id().as_i64()))
        });
        let total = public.len() as u64;
        let page = public
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();
        Ok((page, total))
    }

    async fn delete(&self, id: RoomId) -> Result<(), DomainError> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.rooms.len();
        inner.rooms.retain(|r| r.id() != id);
        if inner.rooms.len() == before {
            return Err(DomainError::room_not_found(id));
        }
        // Cascade under the same lock, matching the transactional delete.
        inner.messages.retain(|m| m.room_id() != id);
        inner.visited.retain(|(_, room_id)| *room_id != id);
        Ok(())
    }
}

#[async_trait]
impl MessageRepository for InMemoryStore {
    async fn append(&self, message: &Message) -> Result<(), DomainError> {
        self.inner.lock().unwrap().messages.push(message.clone());
        Ok(())
    }

    async fn list_by_room(&self, room_id: RoomId) -> Result<Vec<Message>, DomainError> {
        let inner = self.inner.lock().unwrap();
        let mut messages: Vec<Message> = inner
            .messages
            .iter()
            .filter(|m| m.room_id() == room_id)
            .cloned()
            .collect();
        messages.sort_by(|a, b| a.created_at().cmp(b.created_at()));
        Ok(messages)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(&self, user: &User) -> Result<(), DomainError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.users.values().any(|u| u.username() == user.username()) {
            return Err(DomainError::new(
                crate::domain::foundation::ErrorCode::Conflict,
                format!("Username already taken: {}", user.username()),
            ));
        }
        inner.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn update(&self, user: &User) -> Result<(), DomainError> {
        let mut inner = self.inner.lock().unwrap();
        if !inner.users.contains_key(&user.id()) {
            return Err(DomainError::user_not_found(user.id()));
        }
        inner.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError> {
        Ok(self.inner.lock().unwrap().users.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .users
            .values()
            .find(|u| u.username() == username)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, DomainError> {
        let inner = self.inner.lock().unwrap();
        Ok(ids
            .iter()
            .filter_map(|id| inner.users.get(id).cloned())
            .collect())
    }
}

#[async_trait]
impl VisitedRoomRepository for InMemoryStore {
    async fn insert(&self, user_id: UserId, room_id: RoomId) -> Result<bool, DomainError> {
        Ok(self.inner.lock().unwrap().visited.insert((user_id, room_id)))
    }

    async fn insert_many(&self, user_id: UserId, room_ids: &[RoomId]) -> Result<u64, DomainError> {
        let mut inner = self.inner.lock().unwrap();
        let mut inserted = 0;
        for room_id in room_ids {
            if inner.visited.insert((user_id, *room_id)) {
                inserted += 1;
            }
        }
        Ok(inserted)
    }

    async fn list(&self, user_id: UserId) -> Result<Vec<RoomId>, DomainError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .visited
            .iter()
            .filter(|(uid, _)| *uid == user_id)
            .map(|(_, rid)| *rid)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::message::{Actor, MessageContent};

    #[tokio::test]
    async fn insert_assigns_increasing_room_ids() {
        let store = InMemoryStore::new();
        let a = RoomRepository::insert(&store, "a", RoomVisibility::Public, None)
            .await
            .unwrap();
        let b = RoomRepository::insert(&store, "b", RoomVisibility::Public, None)
            .await
            .unwrap();
        assert!(a.id().as_i64() < b.id().as_i64());
    }

    #[tokio::test]
    async fn duplicate_invite_code_conflicts() {
        let store = InMemoryStore::new();
        let code = InviteCode::generate();
        RoomRepository::insert(&store, "a", RoomVisibility::Private, Some(&code))
            .await
            .unwrap();
        let err = RoomRepository::insert(&store, "b", RoomVisibility::Private, Some(&code))
            .await
            .unwrap_err();
        assert_eq!(err.code(), crate::domain::foundation::ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn delete_cascades_messages_and_visits() {
        let store = InMemoryStore::new();
        let room = RoomRepository::insert(
            &store,
            "team",
            RoomVisibility::Private,
            Some(&InviteCode::generate()),
        )
        .await
        .unwrap();

        let actor = Actor::anonymous(Some("ada".into()), None);
        let content = MessageContent::new(Some("hi".into()), None).unwrap();
        MessageRepository::append(&store, &Message::new(room.id(), &actor, content))
            .await
            .unwrap();
        let user_id = UserId::new();
        VisitedRoomRepository::insert(&store, user_id, room.id())
            .await
            .unwrap();

        RoomRepository::delete(&store, room.id()).await.unwrap();

        assert!(RoomRepository::find_by_id(&store, room.id())
            .await
            .unwrap()
            .is_none());
        assert_eq!(store.message_count(room.id()), 0);
        assert!(VisitedRoomRepository::list(&store, user_id)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn visited_insert_is_idempotent() {
        let store = InMemoryStore::new();
        let user_id = UserId::new();
        let room_id = RoomId::from_i64(7);
        assert!(VisitedRoomRepository::insert(&store, user_id, room_id)
            .await
            .unwrap());
        assert!(!VisitedRoomRepository::insert(&store, user_id, room_id)
            .await
            .unwrap());
        assert_eq!(
            VisitedRoomRepository::list(&store, user_id).await.unwrap(),
            vec![room_id]
        );
    }
}
