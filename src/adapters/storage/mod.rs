//! Storage adapters for uploaded images.

pub mod local_image_storage;

pub use local_image_storage::{LocalImageStorage, MAX_IMAGE_SIZE_BYTES};
