//! Message store handlers: append-then-broadcast and history reads.

mod get_history;
mod send_message;

pub use get_history::{GetHistoryHandler, HistoryEntry};
pub use send_message::{SendMessageCommand, SendMessageHandler};
