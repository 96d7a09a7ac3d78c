//! Room repository port.
//!
//! Defines the contract for persisting and retrieving Room aggregates.
//!
//! # Design
//!
//! - **Insert owns id assignment**: the store assigns the numeric room id
//! - **Conflict signaling**: an invite-code uniqueness violation surfaces as
//!   `Conflict` so the creation retry loop can regenerate and retry
//! - **Cascade delete**: deleting a room removes its messages and
//!   visited-room rows in the same atomic unit

use crate::domain::foundation::{DomainError, RoomId};
use crate::domain::room::{InviteCode, Room, RoomVisibility};
use async_trait::async_trait;

/// Repository port for Room aggregate persistence.
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Insert a new room and return it with its store-assigned id.
    ///
    /// # Errors
    ///
    /// - `Conflict` if the invite code is already taken (caller retries
    ///   with a fresh code)
    /// - `DatabaseError` on persistence failure
    async fn insert(
        &self,
        name: &str,
        visibility: RoomVisibility,
        invite_code: Option<&InviteCode>,
    ) -> Result<Room, DomainError>;

    /// Find a room by its numeric id.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: RoomId) -> Result<Option<Room>, DomainError>;

    /// Find a room by its invite code.
    ///
    /// Returns `None` if not found.
    async fn find_by_invite_code(&self, code: &InviteCode) -> Result<Option<Room>, DomainError>;

    /// List public rooms ordered by creation time descending.
    ///
    /// Returns the requested page and the total count of public rooms.
    /// Private rooms never appear in any enumeration.
    async fn list_public(&self, offset: u64, limit: u64) -> Result<(Vec<Room>, u64), DomainError>;

    /// Delete a room together with its messages and visited-room rows.
    ///
    /// The cascade is all-or-nothing: implementations must wrap it in a
    /// single transaction or equivalent atomic unit.
    ///
    /// # Errors
    ///
    /// - `RoomNotFound` if the room doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn delete(&self, id: RoomId) -> Result<(), DomainError>;
}
