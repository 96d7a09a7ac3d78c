//! HTTP handlers for account and visited-room endpoints.

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::identity::{
    LoginUserCommand, RegisterUserCommand, UpdateIdentityCommand,
};
use crate::application::handlers::visited::MergeVisitedCommand;

use super::super::middleware::RequireAuth;
use super::super::rooms::dto::RoomResponse;
use super::super::{ApiError, AppState};
use super::dto::{
    LoginRequest, MergeResponse, RegisterRequest, SessionResponse, UpdateIdentityRequest,
    UserResponse, VisitRoomsBatchRequest,
};

/// POST /api/register - Create an account and open a session
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state
        .register_handler()
        .handle(RegisterUserCommand {
            username: request.username,
            password: request.password,
            display_color: request.color,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(SessionResponse::from(session))))
}

/// POST /api/login - Verify credentials and open a session
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let session = state
        .login_handler()
        .handle(LoginUserCommand {
            username: request.username,
            password: request.password,
        })
        .await?;

    Ok(Json(SessionResponse::from(session)))
}

/// PATCH /api/users/me - Update the caller's display identity
pub async fn update_me(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<UpdateIdentityRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let updated = state
        .update_identity_handler()
        .handle(UpdateIdentityCommand {
            user_id: user.id(),
            display_color: request.color,
        })
        .await?;

    Ok(Json(UserResponse::from(&updated)))
}

/// POST /api/users/visit-rooms-batch - Merge anonymous visit history
///
/// Called once after login or registration with the client's locally
/// tracked private-room ids. Unknown and public ids are dropped; the
/// response reports how many visits were new to the account.
pub async fn visit_rooms_batch(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Json(request): Json<VisitRoomsBatchRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let merged = state
        .merge_visited_handler()
        .handle(MergeVisitedCommand {
            user_id: user.id(),
            room_ids: request.room_ids,
        })
        .await?;

    Ok(Json(MergeResponse { merged }))
}

/// GET /api/users/me/visited-rooms - The caller's private-room shortcuts
pub async fn visited_rooms(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<impl IntoResponse, ApiError> {
    let rooms = state.list_visited_handler().handle(user.id()).await?;
    let rooms: Vec<RoomResponse> = rooms.iter().map(RoomResponse::from).collect();
    Ok(Json(serde_json::json!({ "rooms": rooms })))
}
