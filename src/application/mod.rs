//! Application layer: orchestrates domain objects through the ports.

pub mod handlers;
