//! Application command/query handlers, grouped by component.

pub mod identity;
pub mod message;
pub mod room;
pub mod visited;
