//! Domain layer: entities and value objects, no I/O.

pub mod foundation;
pub mod message;
pub mod room;
pub mod user;
