//! Blob storage port for receipt file content.

use crate::expense::domain::StoredBlob;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for receipt store operations.
pub type ReceiptStoreResult<T> = Result<T, ReceiptStoreError>;

/// Content-addressed storage for uploaded receipt bytes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReceiptStore: Send + Sync {
    /// Writes the content and returns where it was stored.
    ///
    /// The original file name only contributes its extension to the key.
    async fn put(&self, file_name: &str, content: &[u8]) -> ReceiptStoreResult<StoredBlob>;

    /// Reads stored content back.
    ///
    /// # Errors
    ///
    /// Returns [`ReceiptStoreError::NotFound`] for unknown keys and
    /// [`ReceiptStoreError::InvalidKey`] for keys that could escape the
    /// store.
    async fn get(&self, key: &str) -> ReceiptStoreResult<Vec<u8>>;
}

/// Errors returned by receipt store implementations.
#[derive(Debug, Clone, Error)]
pub enum ReceiptStoreError {
    /// The key does not name a stored blob.
    #[error("receipt blob not found: {0}")]
    NotFound(String),

    /// The key is not a plain file name.
    #[error("invalid receipt key: {0}")]
    InvalidKey(String),

    /// Storage I/O failed.
    #[error("receipt storage error: {0}")]
    Io(Arc<dyn std::error::Error + Send + Sync>),
}

impl ReceiptStoreError {
    /// Wraps an I/O error.
    pub fn io(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Io(Arc::new(err))
    }
}
