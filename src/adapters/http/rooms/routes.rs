//! Axum router configuration for room endpoints.

use axum::{routing::get, Router};

use super::super::AppState;
use super::handlers::{create_room, delete_room, list_rooms, resolve_room, room_messages};

/// Create the room API router.
///
/// # Routes
///
/// - `GET /rooms` - List public rooms, paginated
/// - `POST /rooms` - Create a room
/// - `GET /rooms/{id_or_code}` - Resolve a room by id or invite code
/// - `GET /rooms/{id}/messages` - Fetch room history
/// - `DELETE /rooms/{id}` - Delete a room
pub fn room_routes() -> Router<AppState> {
    // The router requires one parameter name per path position, so the
    // delete and messages routes share `:id_or_code` even though they
    // accept numeric ids only.
    Router::new()
        .route("/rooms", get(list_rooms).post(create_room))
        .route(
            "/rooms/:id_or_code",
            get(resolve_room).delete(delete_room),
        )
        .route("/rooms/:id_or_code/messages", get(room_messages))
}
