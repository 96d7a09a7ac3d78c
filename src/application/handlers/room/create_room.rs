//! CreateRoomHandler - Command handler for creating rooms.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::room::{InviteCode, Room, RoomVisibility};
use crate::ports::RoomRepository;

/// Cap on invite-code regeneration attempts. Concurrent creations racing
/// on the same random code are expected and absorbed by retrying; hitting
/// the cap means the store itself is misbehaving, so we fail closed.
const MAX_INVITE_CODE_ATTEMPTS: u32 = 8;

/// Command to create a new room.
#[derive(Debug, Clone)]
pub struct CreateRoomCommand {
    /// Display name for the room.
    pub name: String,
    /// Public (enumerable) or private (invite-only).
    pub visibility: RoomVisibility,
}

/// Handler for room creation.
pub struct CreateRoomHandler {
    rooms: Arc<dyn RoomRepository>,
}

impl CreateRoomHandler {
    pub fn new(rooms: Arc<dyn RoomRepository>) -> Self {
        Self { rooms }
    }

    /// Create a room, generating a unique invite code for private rooms.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed`/`EmptyField` for a bad name, before any side
    ///   effect
    /// - `DatabaseError` if the store is unavailable or the retry cap is
    ///   exhausted; invite-code collisions themselves are never surfaced
    pub async fn handle(&self, cmd: CreateRoomCommand) -> Result<Room, DomainError> {
        let name = Room::validate_name(&cmd.name)?;

        if !cmd.visibility.is_private() {
            let room = self.rooms.insert(&name, RoomVisibility::Public, None).await?;
            tracing::info!(room_id = %room.id(), "public room created");
            return Ok(room);
        }

        for attempt in 1..=MAX_INVITE_CODE_ATTEMPTS {
            let code = InviteCode::generate();
            match self
                .rooms
                .insert(&name, RoomVisibility::Private, Some(&code))
                .await
            {
                Ok(room) => {
                    tracing::info!(room_id = %room.id(), "private room created");
                    return Ok(room);
                }
                Err(err) if err.code() == ErrorCode::Conflict => {
                    tracing::debug!(attempt, "invite code collision, regenerating");
                    continue;
                }
                Err(err) => return Err(err),
            }
        }

        Err(DomainError::database(
            "invite code generation kept colliding, giving up",
        ))
    }
}
