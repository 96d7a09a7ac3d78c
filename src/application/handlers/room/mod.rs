//! Room registry handlers: create, resolve, list, delete.

mod create_room;
mod delete_room;
mod list_rooms;
mod resolve_room;

pub use create_room::{CreateRoomCommand, CreateRoomHandler};
pub use delete_room::DeleteRoomHandler;
pub use list_rooms::{ListRoomsHandler, ListRoomsQuery, RoomPage, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use resolve_room::{ResolveRoomHandler, ResolveRoomQuery, ResolvedRoom};
