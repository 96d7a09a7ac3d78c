//! WebSocket adapters for real-time message fanout.
//!
//! This module carries a sent message from its author to every connection
//! subscribed to the room:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      connection (per client)                        │
//! │   join/leave/message frames in, message/error frames out            │
//! └─────────────────────────────────────────────────────────────────────┘
//!                                     │
//!                                     │ publishes via SendMessageHandler
//!                                     ▼
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    BroadcastChannelRouter                           │
//! │   Room: 17              Room: 42              Room: 99              │
//! │   ├── connection-a      ├── connection-d      └── connection-g      │
//! │   ├── connection-b      └── connection-e                            │
//! │   └── connection-c                                                  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Components
//!
//! - [`messages`] - Wire protocol frame types
//! - [`channels`] - Broadcast-channel implementation of the router port
//! - [`connection`] - Axum upgrade handler and connection lifecycle

pub mod channels;
pub mod connection;
pub mod messages;

pub use channels::BroadcastChannelRouter;
pub use connection::{websocket_router, ws_handler, WebSocketState};
pub use messages::{ClientFrame, ErrorFrame, MessageFrame, ServerFrame};
