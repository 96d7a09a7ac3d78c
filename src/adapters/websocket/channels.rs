//! In-process channel router built on tokio broadcast channels.
//!
//! Rooms are organized by room id; publishing to a room reaches every
//! connection currently subscribed to it.
//!
//! # Architecture
//!
//! ```text
//! Room: 17             Room: 42
//! ├── connection-a     ├── connection-d
//! ├── connection-b     └── connection-e
//! └── connection-c
//! ```
//!
//! A connection may appear under several rooms at once; the reverse index
//! makes disconnect cleanup deterministic.
//!
//! # Thread Safety
//!
//! Uses `RwLock` for the room table since publishes (reads) vastly
//! outnumber joins/leaves (writes). This allows concurrent publishes to
//! different rooms.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::{broadcast, RwLock};

use crate::domain::foundation::{ConnectionId, RoomId};
use crate::domain::message::Message;
use crate::ports::ChannelRouter;

/// In-process implementation of the channel router port.
pub struct BroadcastChannelRouter {
    /// Map of room_id → broadcast sender for that room.
    rooms: RwLock<HashMap<RoomId, broadcast::Sender<Message>>>,

    /// Map of connection_id → rooms it subscribes to, for O(1) cleanup
    /// on disconnect.
    subscriptions: RwLock<HashMap<ConnectionId, HashSet<RoomId>>>,

    /// Channel capacity for each room's broadcast channel.
    channel_capacity: usize,
}

impl BroadcastChannelRouter {
    /// Create a new router with the specified channel capacity.
    ///
    /// Larger capacities absorb bursts better at the cost of memory;
    /// a slow consumer that falls more than `channel_capacity` messages
    /// behind misses the overwritten ones and recovers via history fetch.
    pub fn new(channel_capacity: usize) -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            subscriptions: RwLock::new(HashMap::new()),
            channel_capacity,
        }
    }

    /// Create with default capacity (128 messages).
    pub fn with_default_capacity() -> Self {
        Self::new(128)
    }

    /// Get all room ids with at least one subscriber (for monitoring).
    pub async fn active_rooms(&self) -> Vec<RoomId> {
        self.rooms.read().await.keys().copied().collect()
    }

    /// Total count of connections holding at least one subscription.
    pub async fn connection_count(&self) -> usize {
        self.subscriptions.read().await.len()
    }

    /// Drop room senders that have no receivers left.
    async fn prune_room(&self, room_id: RoomId) {
        let mut rooms = self.rooms.write().await;
        if let Some(sender) = rooms.get(&room_id) {
            if sender.receiver_count() == 0 {
                rooms.remove(&room_id);
            }
        }
    }
}

impl Default for BroadcastChannelRouter {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

#[async_trait]
impl ChannelRouter for BroadcastChannelRouter {
    async fn join(
        &self,
        connection: ConnectionId,
        room_id: RoomId,
    ) -> broadcast::Receiver<Message> {
        let mut rooms = self.rooms.write().await;

        let sender = rooms.entry(room_id).or_insert_with(|| {
            let (tx, _) = broadcast::channel(self.channel_capacity);
            tx
        });

        self.subscriptions
            .write()
            .await
            .entry(connection)
            .or_default()
            .insert(room_id);

        tracing::debug!(connection_id = %connection, room_id = %room_id, "connection joined room");
        sender.subscribe()
    }

    async fn leave(&self, connection: ConnectionId, room_id: RoomId) {
        let mut subscriptions = self.subscriptions.write().await;
        if let Some(rooms) = subscriptions.get_mut(&connection) {
            rooms.remove(&room_id);
            if rooms.is_empty() {
                subscriptions.remove(&connection);
            }
        }
        drop(subscriptions);
        self.prune_room(room_id).await;
    }

    async fn disconnect(&self, connection: ConnectionId) {
        let removed = self.subscriptions.write().await.remove(&connection);
        if let Some(rooms) = removed {
            for room_id in rooms {
                self.prune_room(room_id).await;
            }
            tracing::debug!(connection_id = %connection, "connection subscriptions removed");
        }
    }

    async fn publish(&self, room_id: RoomId, message: Message) {
        let rooms = self.rooms.read().await;
        if let Some(sender) = rooms.get(&room_id) {
            // No receivers is fine; delivery is best-effort.
            let _ = sender.send(message);
        }
    }

    async fn subscriber_count(&self, room_id: RoomId) -> usize {
        self.rooms
            .read()
            .await
            .get(&room_id)
            .map(|s| s.receiver_count())
            .unwrap_or(0)
    }
}
