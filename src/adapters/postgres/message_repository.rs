//! PostgreSQL implementation of MessageRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, MessageId, RoomId, Timestamp, UserId};
use crate::domain::message::{Message, MessageContent};
use crate::ports::MessageRepository;

use super::{column, db_error};

/// PostgreSQL implementation of MessageRepository.
#[derive(Clone)]
pub struct PostgresMessageRepository {
    pool: PgPool,
}

impl PostgresMessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PostgresMessageRepository {
    async fn append(&self, message: &Message) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO messages (
                id, room_id, author_id, display_name, display_color,
                text, image_ref, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(message.id().as_uuid())
        .bind(message.room_id().as_i64())
        .bind(message.author_id().map(|id| *id.as_uuid()))
        .bind(message.display_name())
        .bind(message.display_color())
        .bind(message.content().text())
        .bind(message.content().image_ref())
        .bind(message.created_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("append message", e))?;

        Ok(())
    }

    async fn list_by_room(&self, room_id: RoomId) -> Result<Vec<Message>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, room_id, author_id, display_name, display_color,
                   text, image_ref, created_at
            FROM messages
            WHERE room_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(room_id.as_i64())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("fetch room history", e))?;

        rows.into_iter().map(row_to_message).collect()
    }
}

fn row_to_message(row: PgRow) -> Result<Message, DomainError> {
    let id: Uuid = column(&row, "id")?;
    let room_id: i64 = column(&row, "room_id")?;
    let author_id: Option<Uuid> = column(&row, "author_id")?;
    let display_name: String = column(&row, "display_name")?;
    let display_color: String = column(&row, "display_color")?;
    let text: Option<String> = column(&row, "text")?;
    let image_ref: Option<String> = column(&row, "image_ref")?;
    let created_at: DateTime<Utc> = column(&row, "created_at")?;

    // Validated at append time; a row failing here indicates corruption.
    let content = MessageContent::new(text, image_ref).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Stored message content is invalid: {}", e.message),
        )
    })?;

    Ok(Message::reconstitute(
        MessageId::from_uuid(id),
        RoomId::from_i64(room_id),
        author_id.map(UserId::from_uuid),
        display_name,
        display_color,
        content,
        Timestamp::from_datetime(created_at),
    ))
}
