//! Visited-room repository port.
//!
//! Stores the set of (user, private room) visit pairs used to populate a
//! personal shortcut list. Membership only: no ordering semantics beyond
//! insertion, and insertion is idempotent.

use crate::domain::foundation::{DomainError, RoomId, UserId};
use async_trait::async_trait;

/// Repository port for per-user visited private-room records.
///
/// Callers are responsible for the "private rooms only" invariant: the
/// tracker filters out public and unknown room ids before inserting.
#[async_trait]
pub trait VisitedRoomRepository: Send + Sync {
    /// Record a visit. Idempotent: inserting an existing pair is a no-op.
    ///
    /// Returns `true` if the pair was newly inserted.
    async fn insert(&self, user_id: UserId, room_id: RoomId) -> Result<bool, DomainError>;

    /// Bulk-record visits with set-union semantics.
    ///
    /// Duplicates within the input or against existing rows are silently
    /// absorbed. Returns the number of rows actually inserted.
    async fn insert_many(&self, user_id: UserId, room_ids: &[RoomId]) -> Result<u64, DomainError>;

    /// List the room ids the user has visited, unordered.
    ///
    /// Visit rows disappear only through the room deletion cascade owned
    /// by `RoomRepository::delete`.
    async fn list(&self, user_id: UserId) -> Result<Vec<RoomId>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visited_room_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn VisitedRoomRepository) {}
    }
}
