//! Parlor - Multi-Room Real-Time Chat Backend
//!
//! This crate implements the room messaging and membership core: room
//! lifecycle (public/private rooms, invite codes), durable append-only
//! message history, real-time fanout to connected clients, and merge of
//! anonymously-collected visited-room lists into accounts at login.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
