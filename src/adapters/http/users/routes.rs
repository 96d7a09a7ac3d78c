//! Axum router configuration for account endpoints.

use axum::{
    routing::{get, patch, post},
    Router,
};

use super::super::AppState;
use super::handlers::{login, register, update_me, visit_rooms_batch, visited_rooms};

/// Create the account API router.
///
/// # Routes
///
/// ## Open Endpoints
/// - `POST /register` - Create an account and open a session
/// - `POST /login` - Verify credentials and open a session
///
/// ## Account Endpoints (require authentication)
/// - `PATCH /users/me` - Update display identity
/// - `POST /users/visit-rooms-batch` - Merge anonymous visit history
/// - `GET /users/me/visited-rooms` - Private-room shortcut list
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/users/me", patch(update_me))
        .route("/users/visit-rooms-batch", post(visit_rooms_batch))
        .route("/users/me/visited-rooms", get(visited_rooms))
}
