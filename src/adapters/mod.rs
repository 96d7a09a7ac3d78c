//! Adapters - concrete implementations of the ports.
//!
//! Everything that touches the outside world lives here: PostgreSQL
//! repositories, the WebSocket fanout, HTTP routes, credential hashing,
//! token signing, and local image storage. The in-memory variants back
//! the application-layer tests.

pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod storage;
pub mod websocket;
