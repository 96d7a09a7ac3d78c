//! HTTP adapter for room endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::room_routes;
