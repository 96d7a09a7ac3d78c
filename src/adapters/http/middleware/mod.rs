//! HTTP middleware and request extractors.

pub mod auth;

pub use auth::{OptionalAuth, RequireAuth};
