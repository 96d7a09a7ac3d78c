//! PostgreSQL adapters.
//!
//! Implements the repository ports on top of sqlx. Each repository owns
//! its table; the room deletion cascade is the one cross-table operation
//! and runs in a single transaction inside `PostgresRoomRepository`.

pub mod message_repository;
pub mod room_repository;
pub mod user_repository;
pub mod visited_room_repository;

pub use message_repository::PostgresMessageRepository;
pub use room_repository::PostgresRoomRepository;
pub use user_repository::PostgresUserRepository;
pub use visited_room_repository::PostgresVisitedRoomRepository;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Postgres unique-violation SQLSTATE.
const UNIQUE_VIOLATION: &str = "23505";

/// Map a sqlx error to a domain database error with context.
pub(crate) fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(
        ErrorCode::DatabaseError,
        format!("Failed to {}: {}", context, e),
    )
}

/// Whether the error is a unique-constraint violation.
pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == UNIQUE_VIOLATION)
}

/// Fetch a column with a contextual error.
pub(crate) fn column<'r, T>(row: &'r sqlx::postgres::PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    use sqlx::Row;
    row.try_get(name).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to get {}: {}", name, e),
        )
    })
}
