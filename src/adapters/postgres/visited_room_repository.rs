//! PostgreSQL implementation of VisitedRoomRepository.
//!
//! Idempotence is carried by the primary key on (user_id, room_id) plus
//! `ON CONFLICT DO NOTHING`; the affected-row count then reports exactly
//! the rows that were new.

use async_trait::async_trait;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, RoomId, UserId};
use crate::ports::VisitedRoomRepository;

use super::db_error;

/// PostgreSQL implementation of VisitedRoomRepository.
#[derive(Clone)]
pub struct PostgresVisitedRoomRepository {
    pool: PgPool,
}

impl PostgresVisitedRoomRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VisitedRoomRepository for PostgresVisitedRoomRepository {
    async fn insert(&self, user_id: UserId, room_id: RoomId) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO visited_rooms (user_id, room_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(room_id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("record visit", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn insert_many(&self, user_id: UserId, room_ids: &[RoomId]) -> Result<u64, DomainError> {
        if room_ids.is_empty() {
            return Ok(0);
        }

        let ids: Vec<i64> = room_ids.iter().map(RoomId::as_i64).collect();
        let result = sqlx::query(
            r#"
            INSERT INTO visited_rooms (user_id, room_id)
            SELECT $1, unnest($2::bigint[])
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(&ids)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("merge visits", e))?;

        Ok(result.rows_affected())
    }

    async fn list(&self, user_id: UserId) -> Result<Vec<RoomId>, DomainError> {
        let rows = sqlx::query("SELECT room_id FROM visited_rooms WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("list visits", e))?;

        rows.into_iter()
            .map(|row| {
                row.try_get::<i64, _>("room_id")
                    .map(RoomId::from_i64)
                    .map_err(|e| db_error("read visit row", e))
            })
            .collect()
    }
}
