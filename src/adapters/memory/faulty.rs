//! Failure-injecting wrappers around [`InMemoryStore`].
//!
//! Handler tests use these to reach the error branches a well-behaved
//! store never triggers: invite-code uniqueness conflicts and append
//! failures. Everything except the injected operation delegates to the
//! wrapped store.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, RoomId};
use crate::domain::message::Message;
use crate::domain::room::{InviteCode, Room, RoomVisibility};
use crate::ports::{MessageRepository, RoomRepository};

use super::InMemoryStore;

/// Room store that reports a uniqueness conflict for the first
/// `conflicts` inserts, then behaves like the wrapped store.
///
/// Pass `u32::MAX` to make every insert conflict.
pub struct ConflictingRoomStore {
    inner: Arc<InMemoryStore>,
    conflicts_left: AtomicU32,
}

impl ConflictingRoomStore {
    pub fn new(inner: Arc<InMemoryStore>, conflicts: u32) -> Self {
        Self {
            inner,
            conflicts_left: AtomicU32::new(conflicts),
        }
    }
}

#[async_trait]
impl RoomRepository for ConflictingRoomStore {
    async fn insert(
        &self,
        name: &str,
        visibility: RoomVisibility,
        invite_code: Option<&InviteCode>,
    ) -> Result<Room, DomainError> {
        let inject = self
            .conflicts_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if inject {
            return Err(DomainError::new(
                ErrorCode::Conflict,
                "Invite code already taken",
            ));
        }
        RoomRepository::insert(self.inner.as_ref(), name, visibility, invite_code).await
    }

    async fn find_by_id(&self, id: RoomId) -> Result<Option<Room>, DomainError> {
        RoomRepository::find_by_id(self.inner.as_ref(), id).await
    }

    async fn find_by_invite_code(&self, code: &InviteCode) -> Result<Option<Room>, DomainError> {
        RoomRepository::find_by_invite_code(self.inner.as_ref(), code).await
    }

    async fn list_public(&self, offset: u64, limit: u64) -> Result<(Vec<Room>, u64), DomainError> {
        RoomRepository::list_public(self.inner.as_ref(), offset, limit).await
    }

    async fn delete(&self, id: RoomId) -> Result<(), DomainError> {
        RoomRepository::delete(self.inner.as_ref(), id).await
    }
}

/// Message store whose appends always fail as if the database were down.
pub struct UnavailableMessageStore {
    inner: Arc<InMemoryStore>,
}

impl UnavailableMessageStore {
    pub fn new(inner: Arc<InMemoryStore>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl MessageRepository for UnavailableMessageStore {
    async fn append(&self, _message: &Message) -> Result<(), DomainError> {
        Err(DomainError::database("message store unavailable"))
    }

    async fn list_by_room(&self, room_id: RoomId) -> Result<Vec<Message>, DomainError> {
        MessageRepository::list_by_room(self.inner.as_ref(), room_id).await
    }
}
