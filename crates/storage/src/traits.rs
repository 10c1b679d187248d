//! Storage trait definitions.

use crate::error::StorageResult;
use async_trait::async_trait;
use bytes::Bytes;

/// Byte storage keyed by file identifier.
///
/// Blobs are stored verbatim: no envelope, no checksum.
#[async_trait]
pub trait BlobStore: Send + Sync + 'static {
    /// Check if a blob exists.
    async fn exists(&self, key: &str) -> StorageResult<bool>;

    /// Get a blob's content.
    async fn get(&self, key: &str) -> StorageResult<Bytes>;

    /// Write a blob atomically, replacing any previous content.
    async fn put(&self, key: &str, data: Bytes) -> StorageResult<()>;

    /// Delete a blob. Fails with `NotFound` if it does not exist.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// List the keys of all stored blobs, in unspecified order.
    async fn list(&self) -> StorageResult<Vec<String>>;

    /// Get the name of this storage backend, for logging.
    fn backend_name(&self) -> &'static str;

    /// Verify the backend is reachable and properly configured.
    ///
    /// The default implementation returns Ok(()).
    async fn health_check(&self) -> StorageResult<()> {
        Ok(())
    }
}
