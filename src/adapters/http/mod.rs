//! HTTP adapters - REST API implementations.
//!
//! Each resource has its own module with DTOs, handlers, and routes. All
//! routes share one [`AppState`]; command/query handlers are constructed
//! on demand from it.

pub mod middleware;
pub mod rooms;
pub mod uploads;
pub mod users;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Json, Router};
use serde::Serialize;

use crate::application::handlers::identity::{
    LoginUserHandler, RegisterUserHandler, ResolveIdentityHandler, UpdateIdentityHandler,
};
use crate::application::handlers::message::GetHistoryHandler;
use crate::application::handlers::room::{
    CreateRoomHandler, DeleteRoomHandler, ListRoomsHandler, ResolveRoomHandler,
};
use crate::application::handlers::visited::{ListVisitedHandler, MergeVisitedHandler};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{
    ChannelRouter, CredentialHasher, ImageStorage, MessageRepository, RoomRepository, TokenService,
    UserRepository, VisitedRoomRepository,
};

/// Shared application state containing all dependencies.
///
/// Cloned per request; every dependency is Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub rooms: Arc<dyn RoomRepository>,
    pub messages: Arc<dyn MessageRepository>,
    pub users: Arc<dyn UserRepository>,
    pub visited: Arc<dyn VisitedRoomRepository>,
    pub channel_router: Arc<dyn ChannelRouter>,
    pub hasher: Arc<dyn CredentialHasher>,
    pub tokens: Arc<dyn TokenService>,
    pub images: Arc<dyn ImageStorage>,
}

impl AppState {
    /// Create handlers on demand from the shared state.
    pub fn create_room_handler(&self) -> CreateRoomHandler {
        CreateRoomHandler::new(self.rooms.clone())
    }

    pub fn list_rooms_handler(&self) -> ListRoomsHandler {
        ListRoomsHandler::new(self.rooms.clone())
    }

    pub fn resolve_room_handler(&self) -> ResolveRoomHandler {
        ResolveRoomHandler::new(self.rooms.clone(), self.visited.clone())
    }

    pub fn delete_room_handler(&self) -> DeleteRoomHandler {
        DeleteRoomHandler::new(self.rooms.clone())
    }

    pub fn history_handler(&self) -> GetHistoryHandler {
        GetHistoryHandler::new(self.rooms.clone(), self.messages.clone(), self.users.clone())
    }

    pub fn register_handler(&self) -> RegisterUserHandler {
        RegisterUserHandler::new(self.users.clone(), self.hasher.clone(), self.tokens.clone())
    }

    pub fn login_handler(&self) -> LoginUserHandler {
        LoginUserHandler::new(self.users.clone(), self.hasher.clone(), self.tokens.clone())
    }

    pub fn update_identity_handler(&self) -> UpdateIdentityHandler {
        UpdateIdentityHandler::new(self.users.clone())
    }

    pub fn identity_handler(&self) -> ResolveIdentityHandler {
        ResolveIdentityHandler::new(self.users.clone(), self.tokens.clone())
    }

    pub fn merge_visited_handler(&self) -> MergeVisitedHandler {
        MergeVisitedHandler::new(self.rooms.clone(), self.visited.clone())
    }

    pub fn list_visited_handler(&self) -> ListVisitedHandler {
        ListVisitedHandler::new(self.rooms.clone(), self.visited.clone())
    }
}

/// Create the REST API router, nested under `/api` by the caller.
pub fn api_routes() -> Router<AppState> {
    rooms::room_routes()
        .merge(users::user_routes())
        .merge(uploads::upload_routes())
}

// ════════════════════════════════════════════════════════════════════════════
// Error envelope
// ════════════════════════════════════════════════════════════════════════════

/// Standard error response body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional details (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: None,
        }
    }
}

/// Wrapper making domain errors usable as handler rejections.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.0.code() {
            ErrorCode::ValidationFailed | ErrorCode::EmptyField | ErrorCode::InvalidFormat => {
                StatusCode::BAD_REQUEST
            }
            ErrorCode::RoomNotFound | ErrorCode::UserNotFound => StatusCode::NOT_FOUND,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::DatabaseError => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::StorageError => StatusCode::BAD_GATEWAY,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(code = %self.0.code(), message = %self.0.message, "request failed");
        }

        let mut body = ErrorResponse::new(self.0.code().to_string(), self.0.message);
        if !self.0.details.is_empty() {
            body.details = serde_json::to_value(&self.0.details).ok();
        }
        (status, Json(body)).into_response()
    }
}
