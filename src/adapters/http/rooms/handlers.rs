//! HTTP handlers for room endpoints.
//!
//! These handlers connect Axum routes to application layer command/query
//! handlers.

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::room::{
    CreateRoomCommand, ListRoomsQuery, ResolveRoomQuery, DEFAULT_PAGE_SIZE,
};
use crate::domain::foundation::{DomainError, RoomId};
use crate::domain::room::RoomVisibility;

use super::super::middleware::OptionalAuth;
use super::super::{ApiError, AppState};
use super::dto::{
    CreateRoomRequest, ListRoomsParams, MessageResponse, MessagesResponse, ResolveRoomResponse,
    RoomPageResponse, RoomResponse,
};

/// Parse a path segment as a numeric room id, mapping garbage to 404.
fn parse_room_id(raw: &str) -> Result<RoomId, ApiError> {
    raw.parse()
        .map_err(|_| ApiError(DomainError::room_not_found(raw)))
}

/// GET /api/rooms - List public rooms, paginated
pub async fn list_rooms(
    State(state): State<AppState>,
    Query(params): Query<ListRoomsParams>,
) -> Result<impl IntoResponse, ApiError> {
    let page = state
        .list_rooms_handler()
        .handle(ListRoomsQuery {
            page: params.page.unwrap_or(1),
            page_size: params.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        })
        .await?;

    Ok(Json(RoomPageResponse::from(page)))
}

/// POST /api/rooms - Create a room
pub async fn create_room(
    State(state): State<AppState>,
    Json(request): Json<CreateRoomRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let room = state
        .create_room_handler()
        .handle(CreateRoomCommand {
            name: request.name,
            visibility: if request.is_private {
                RoomVisibility::Private
            } else {
                RoomVisibility::Public
            },
        })
        .await?;

    Ok((StatusCode::CREATED, Json(RoomResponse::from(&room))))
}

/// GET /api/rooms/{id_or_code} - Resolve a room by id or invite code
///
/// For authenticated callers resolving a private room, this also records
/// the visit and returns the caller's refreshed shortcut list.
pub async fn resolve_room(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Path(id_or_code): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let resolved = state
        .resolve_room_handler()
        .handle(ResolveRoomQuery {
            id_or_code,
            user_id: user.map(|u| u.id()),
        })
        .await?;

    Ok(Json(ResolveRoomResponse {
        room: RoomResponse::from(&resolved.room),
        visited_private_rooms: resolved
            .visited_rooms
            .map(|rooms| rooms.iter().map(RoomResponse::from).collect()),
    }))
}

/// GET /api/rooms/{id}/messages - Fetch a room's history, oldest first
pub async fn room_messages(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let room_id = parse_room_id(&id)?;
    let entries = state.history_handler().handle(room_id).await?;

    Ok(Json(MessagesResponse {
        messages: entries.iter().map(MessageResponse::from).collect(),
    }))
}

/// DELETE /api/rooms/{id} - Delete a room and everything attached to it
pub async fn delete_room(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let room_id = parse_room_id(&id)?;
    state.delete_room_handler().handle(room_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
