//! Image storage port.
//!
//! Object-storage upload mechanics are an external collaborator. A storage
//! failure aborts only the image portion of a send, never room or history
//! state.

use crate::domain::foundation::DomainError;
use async_trait::async_trait;

/// Stores uploaded image blobs and returns their public URL.
#[async_trait]
pub trait ImageStorage: Send + Sync {
    /// Store a blob and return the URL it will be served from.
    ///
    /// # Errors
    ///
    /// - `StorageError` if the blob cannot be stored
    async fn store(&self, bytes: &[u8], content_type: &str) -> Result<String, DomainError>;
}
