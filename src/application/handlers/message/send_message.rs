//! SendMessageHandler - Command handler for the append-then-broadcast path.
//!
//! Ordering contract: persist via the message repository first, then
//! publish via the channel router. Broadcasting before successful
//! persistence is forbidden — a live message that silently vanishes from
//! history for a reconnecting peer is worse than a late one. If
//! persistence fails, no publish happens and the error goes to the sender
//! only.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, RoomId};
use crate::domain::message::{Actor, Message, MessageContent};
use crate::ports::{ChannelRouter, MessageRepository, RoomRepository};

/// Command to append a message and fan it out.
#[derive(Debug, Clone)]
pub struct SendMessageCommand {
    pub room_id: RoomId,
    /// Already-resolved sender (see `ResolveIdentityHandler`).
    pub actor: Actor,
    pub text: Option<String>,
    pub image_ref: Option<String>,
}

/// Handler for message sends.
pub struct SendMessageHandler {
    rooms: Arc<dyn RoomRepository>,
    messages: Arc<dyn MessageRepository>,
    router: Arc<dyn ChannelRouter>,
}

impl SendMessageHandler {
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        messages: Arc<dyn MessageRepository>,
        router: Arc<dyn ChannelRouter>,
    ) -> Self {
        Self {
            rooms,
            messages,
            router,
        }
    }

    /// Validate, persist, then broadcast.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if neither text nor image reference is present,
    ///   before any side effect
    /// - `RoomNotFound` if the room doesn't exist
    /// - `DatabaseError` if the append fails; the broadcast is suppressed
    pub async fn handle(&self, cmd: SendMessageCommand) -> Result<Message, DomainError> {
        let content = MessageContent::new(cmd.text, cmd.image_ref)?;

        let room = self
            .rooms
            .find_by_id(cmd.room_id)
            .await?
            .ok_or_else(|| DomainError::room_not_found(cmd.room_id))?;

        let message = Message::new(room.id(), &cmd.actor, content);
        self.messages.append(&message).await?;
        self.router.publish(room.id(), message.clone()).await;

        tracing::debug!(
            room_id = %room.id(),
            message_id = %message.id(),
            authenticated = message.author_id().is_some(),
            "message appended and published"
        );
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryStore, UnavailableMessageStore};
    use crate::adapters::websocket::BroadcastChannelRouter;
    use crate::application::handlers::room::{CreateRoomCommand, CreateRoomHandler};
    use crate::domain::foundation::{ConnectionId, ErrorCode};
    use crate::domain::room::RoomVisibility;

    async fn room(store: &Arc<InMemoryStore>) -> RoomId {
        CreateRoomHandler::new(store.clone())
            .handle(CreateRoomCommand {
                name: "general".into(),
                visibility: RoomVisibility::Public,
            })
            .await
            .unwrap()
            .id()
    }

    fn handler(
        store: &Arc<InMemoryStore>,
        router: &Arc<BroadcastChannelRouter>,
    ) -> SendMessageHandler {
        SendMessageHandler::new(store.clone(), store.clone(), router.clone())
    }

    #[tokio::test]
    async fn anonymous_send_lands_in_history_with_declared_name() {
        let store = Arc::new(InMemoryStore::new());
        let router = Arc::new(BroadcastChannelRouter::with_default_capacity());
        let room_id = room(&store).await;

        let message = handler(&store, &router)
            .handle(SendMessageCommand {
                room_id,
                actor: Actor::anonymous(Some("drifter".into()), Some("#00ff00".into())),
                text: Some("hi".into()),
                image_ref: None,
            })
            .await
            .unwrap();

        assert_eq!(message.author_id(), None);
        assert_eq!(message.display_name(), "drifter");
        assert_eq!(store.message_count(room_id), 1);
    }

    #[tokio::test]
    async fn empty_send_is_rejected_with_no_history_entry_and_no_broadcast() {
        let store = Arc::new(InMemoryStore::new());
        let router = Arc::new(BroadcastChannelRouter::with_default_capacity());
        let room_id = room(&store).await;

        let mut rx = router.join(ConnectionId::new(), room_id).await;

        let err = handler(&store, &router)
            .handle(SendMessageCommand {
                room_id,
                actor: Actor::anonymous(None, None),
                text: Some("   ".into()),
                image_ref: None,
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::EmptyField);
        assert_eq!(store.message_count(room_id), 0);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn unknown_room_is_not_found() {
        let store = Arc::new(InMemoryStore::new());
        let router = Arc::new(BroadcastChannelRouter::with_default_capacity());

        let err = handler(&store, &router)
            .handle(SendMessageCommand {
                room_id: RoomId::from_i64(404),
                actor: Actor::anonymous(None, None),
                text: Some("hi".into()),
                image_ref: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::RoomNotFound);
    }

    #[tokio::test]
    async fn send_broadcasts_to_subscribed_connections() {
        let store = Arc::new(InMemoryStore::new());
        let router = Arc::new(BroadcastChannelRouter::with_default_capacity());
        let room_id = room(&store).await;

        let mut rx = router.join(ConnectionId::new(), room_id).await;

        handler(&store, &router)
            .handle(SendMessageCommand {
                room_id,
                actor: Actor::anonymous(Some("drifter".into()), None),
                text: Some("hello".into()),
                image_ref: None,
            })
            .await
            .unwrap();

        let delivered = rx.recv().await.unwrap();
        assert_eq!(delivered.content().text(), Some("hello"));
    }

    #[tokio::test]
    async fn failed_append_suppresses_the_broadcast() {
        let store = Arc::new(InMemoryStore::new());
        let router = Arc::new(BroadcastChannelRouter::with_default_capacity());
        let room_id = room(&store).await;
        let messages = Arc::new(UnavailableMessageStore::new(store.clone()));

        let mut rx = router.join(ConnectionId::new(), room_id).await;

        let err = SendMessageHandler::new(store.clone(), messages, router.clone())
            .handle(SendMessageCommand {
                room_id,
                actor: Actor::anonymous(Some("drifter".into()), None),
                text: Some("hello".into()),
                image_ref: None,
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::DatabaseError);
        assert!(rx.try_recv().is_err());
    }
}
