//! Channel router port.
//!
//! The channel router owns the process-wide subscription table mapping
//! rooms to connected clients and fans persisted messages out to them.
//! It is a port so the in-process table can later be backed by an external
//! pub/sub substrate for multi-process scaling; nothing in this contract
//! assumes a single process.
//!
//! # Delivery semantics
//!
//! - At-most-once per currently-subscribed connection, best-effort
//! - A disconnected or not-yet-joined connection receives nothing and
//!   recovers by fetching history after joining
//! - Publish must only be called after successful persistence (the
//!   persist-then-publish ordering contract lives in the send handler)

use crate::domain::foundation::{ConnectionId, RoomId};
use crate::domain::message::Message;
use async_trait::async_trait;
use tokio::sync::broadcast;

/// Routes persisted messages to connections subscribed to a room.
///
/// A connection may hold subscriptions to multiple rooms simultaneously;
/// there is no implicit single-room-at-a-time constraint. Subscription
/// lifetime is tied to the connection: `disconnect` deterministically
/// removes every subscription the connection holds.
#[async_trait]
pub trait ChannelRouter: Send + Sync {
    /// Subscribe a connection to a room's logical channel.
    ///
    /// Returns a receiver of messages published to that room. Joining a
    /// second room accumulates subscriptions.
    async fn join(&self, connection: ConnectionId, room_id: RoomId)
        -> broadcast::Receiver<Message>;

    /// Drop one of the connection's subscriptions.
    async fn leave(&self, connection: ConnectionId, room_id: RoomId);

    /// Drop all of the connection's subscriptions.
    async fn disconnect(&self, connection: ConnectionId);

    /// Deliver a message to every connection currently subscribed to the
    /// room at the moment of publish. No-op for unknown rooms.
    async fn publish(&self, room_id: RoomId, message: Message);

    /// Number of connections currently subscribed to a room.
    async fn subscriber_count(&self, room_id: RoomId) -> usize;
}
