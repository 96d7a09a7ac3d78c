//! Local filesystem implementation of the image storage port.
//!
//! Stores uploaded blobs under a flat directory with random names and
//! serves them back under a configurable URL prefix.
//!
//! # Atomic Writes
//!
//! Uses a write-to-temp-then-rename pattern:
//! 1. Write the blob to `{name}.tmp`
//! 2. Sync to disk
//! 3. Rename to `{name}`
//!
//! This prevents a half-written image from ever being servable.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::ImageStorage;

/// Maximum image size allowed (5 MB).
pub const MAX_IMAGE_SIZE_BYTES: usize = 5 * 1024 * 1024;

/// Local filesystem storage for uploaded images.
#[derive(Debug, Clone)]
pub struct LocalImageStorage {
    /// Directory the blobs are written into.
    base_path: PathBuf,
    /// URL prefix the files are served under, e.g. `/uploads`.
    public_prefix: String,
}

impl LocalImageStorage {
    pub fn new(base_path: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            public_prefix: public_prefix.into(),
        }
    }

    /// Directory uploads are written to (for static file serving).
    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }

    /// Map a MIME type to a file extension. Unknown types fall back to
    /// `bin`; the browser re-sniffs on display anyway.
    fn extension_for(content_type: &str) -> &'static str {
        match content_type {
            "image/png" => "png",
            "image/jpeg" => "jpg",
            "image/gif" => "gif",
            "image/webp" => "webp",
            _ => "bin",
        }
    }

    fn storage_error(context: &str, e: std::io::Error) -> DomainError {
        DomainError::new(
            ErrorCode::StorageError,
            format!("Failed to {}: {}", context, e),
        )
    }

    /// Write the blob to the temp path and promote it to its final name.
    ///
    /// On failure the temp file is removed; a stale `.tmp` never outlives
    /// the request that created it.
    async fn write_atomic(
        temp_path: &Path,
        final_path: &Path,
        bytes: &[u8],
    ) -> Result<(), DomainError> {
        match Self::write_and_promote(temp_path, final_path, bytes).await {
            Ok(()) => Ok(()),
            Err(err) => {
                let _ = fs::remove_file(temp_path).await;
                Err(err)
            }
        }
    }

    async fn write_and_promote(
        temp_path: &Path,
        final_path: &Path,
        bytes: &[u8],
    ) -> Result<(), DomainError> {
        let mut file = fs::File::create(temp_path)
            .await
            .map_err(|e| Self::storage_error("create temp file", e))?;
        file.write_all(bytes)
            .await
            .map_err(|e| Self::storage_error("write image", e))?;
        file.sync_all()
            .await
            .map_err(|e| Self::storage_error("sync image", e))?;

        fs::rename(temp_path, final_path)
            .await
            .map_err(|e| Self::storage_error("finalize image", e))
    }
}

#[async_trait]
impl ImageStorage for LocalImageStorage {
    async fn store(&self, bytes: &[u8], content_type: &str) -> Result<String, DomainError> {
        if bytes.is_empty() {
            return Err(DomainError::new(
                ErrorCode::EmptyField,
                "Image payload is empty",
            ));
        }
        if bytes.len() > MAX_IMAGE_SIZE_BYTES {
            return Err(DomainError::new(
                ErrorCode::InvalidFormat,
                format!(
                    "Image exceeds maximum size of {} bytes",
                    MAX_IMAGE_SIZE_BYTES
                ),
            ));
        }

        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| Self::storage_error("create upload directory", e))?;

        let name = format!("{}.{}", Uuid::new_v4(), Self::extension_for(content_type));
        let final_path = self.base_path.join(&name);
        let temp_path = self.base_path.join(format!("{}.tmp", name));

        Self::write_atomic(&temp_path, &final_path, bytes).await?;

        tracing::debug!(file = %name, size = bytes.len(), "image stored");
        Ok(format!("{}/{}", self.public_prefix, name))
    }
}
