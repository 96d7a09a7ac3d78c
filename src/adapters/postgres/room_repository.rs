//! PostgreSQL implementation of RoomRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, ErrorCode, RoomId, Timestamp};
use crate::domain::room::{InviteCode, Room, RoomVisibility};
use crate::ports::RoomRepository;

use super::{column, db_error, is_unique_violation};

/// PostgreSQL implementation of RoomRepository.
#[derive(Clone)]
pub struct PostgresRoomRepository {
    pool: PgPool,
}

impl PostgresRoomRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomRepository for PostgresRoomRepository {
    async fn insert(
        &self,
        name: &str,
        visibility: RoomVisibility,
        invite_code: Option<&InviteCode>,
    ) -> Result<Room, DomainError> {
        let created_at = Timestamp::now();
        let row = sqlx::query(
            r#"
            INSERT INTO rooms (name, is_private, invite_code, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(name)
        .bind(visibility == RoomVisibility::Private)
        .bind(invite_code.map(InviteCode::as_str))
        .bind(created_at.as_datetime())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::new(ErrorCode::Conflict, "Invite code already taken")
            } else {
                db_error("insert room", e)
            }
        })?;

        let id: i64 = column(&row, "id")?;
        Ok(Room::reconstitute(
            RoomId::from_i64(id),
            name.to_string(),
            visibility,
            invite_code.cloned(),
            created_at,
        ))
    }

    async fn find_by_id(&self, id: RoomId) -> Result<Option<Room>, DomainError> {
        let row = sqlx::query(
            "SELECT id, name, is_private, invite_code, created_at FROM rooms WHERE id = $1",
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("fetch room", e))?;

        row.map(row_to_room).transpose()
    }

    async fn find_by_invite_code(&self, code: &InviteCode) -> Result<Option<Room>, DomainError> {
        let row = sqlx::query(
            "SELECT id, name, is_private, invite_code, created_at FROM rooms WHERE invite_code = $1",
        )
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("fetch room by invite code", e))?;

        row.map(row_to_room).transpose()
    }

    async fn list_public(&self, offset: u64, limit: u64) -> Result<(Vec<Room>, u64), DomainError> {
        let total: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM rooms WHERE NOT is_private")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| db_error("count public rooms", e))?;

        let rows = sqlx::query(
            r#"
            SELECT id, name, is_private, invite_code, created_at
            FROM rooms
            WHERE NOT is_private
            ORDER BY created_at DESC, id DESC
            OFFSET $1 LIMIT $2
            "#,
        )
        .bind(offset as i64)
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("list public rooms", e))?;

        let rooms: Result<Vec<Room>, DomainError> = rows.into_iter().map(row_to_room).collect();
        Ok((rooms?, total.0 as u64))
    }

    async fn delete(&self, id: RoomId) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("begin delete transaction", e))?;

        sqlx::query("DELETE FROM messages WHERE room_id = $1")
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("delete room messages", e))?;

        sqlx::query("DELETE FROM visited_rooms WHERE room_id = $1")
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("delete room visit rows", e))?;

        let result = sqlx::query("DELETE FROM rooms WHERE id = $1")
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("delete room", e))?;

        if result.rows_affected() == 0 {
            // Rolls back implicitly on drop.
            return Err(DomainError::room_not_found(id));
        }

        tx.commit()
            .await
            .map_err(|e| db_error("commit room deletion", e))?;
        Ok(())
    }
}

fn row_to_room(row: PgRow) -> Result<Room, DomainError> {
    let id: i64 = column(&row, "id")?;
    let name: String = column(&row, "name")?;
    let is_private: bool = column(&row, "is_private")?;
    let invite_code: Option<String> = column(&row, "invite_code")?;
    let created_at: DateTime<Utc> = column(&row, "created_at")?;

    let invite_code = invite_code
        .map(|code| {
            InviteCode::parse(&code).map_err(|e| {
                DomainError::new(
                    ErrorCode::DatabaseError,
                    format!("Stored invite code is invalid: {}", e),
                )
            })
        })
        .transpose()?;

    Ok(Room::reconstitute(
        RoomId::from_i64(id),
        name,
        if is_private {
            RoomVisibility::Private
        } else {
            RoomVisibility::Public
        },
        invite_code,
        Timestamp::from_datetime(created_at),
    ))
}
