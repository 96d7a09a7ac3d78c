//! Ports: async trait contracts between the application core and its
//! adapters.

mod channel_router;
mod credential_hasher;
mod image_storage;
mod message_repository;
mod room_repository;
mod token_service;
mod user_repository;
mod visited_room_repository;

pub use channel_router::ChannelRouter;
pub use credential_hasher::CredentialHasher;
pub use image_storage::ImageStorage;
pub use message_repository::MessageRepository;
pub use room_repository::RoomRepository;
pub use token_service::TokenService;
pub use user_repository::UserRepository;
pub use visited_room_repository::VisitedRoomRepository;
