//! In-memory adapters for tests and development.

mod faulty;
mod store;

pub use faulty::{ConflictingRoomStore, UnavailableMessageStore};
pub use store::InMemoryStore;
