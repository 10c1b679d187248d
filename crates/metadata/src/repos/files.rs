//! File record repository.

use crate::error::MetadataResult;
use crate::models::FileRow;
use async_trait::async_trait;

/// Repository for file records.
///
/// Every method is a single statement against the store; none of them
/// holds a connection or transaction open across calls.
#[async_trait]
pub trait FileRepo: Send + Sync {
    /// Check whether a record with this identifier exists.
    async fn file_exists(&self, id: &str) -> MetadataResult<bool>;

    /// Insert a record.
    ///
    /// Fails with `AlreadyExists` if the identifier is taken, even when the
    /// caller checked `file_exists` first and lost a race.
    async fn create_file(&self, file: &FileRow) -> MetadataResult<()>;

    /// Get a record by identifier.
    async fn get_file(&self, id: &str) -> MetadataResult<Option<FileRow>>;

    /// List all records, in unspecified order.
    async fn list_files(&self) -> MetadataResult<Vec<FileRow>>;

    /// Delete a record. Fails with `NotFound` if nothing was deleted.
    async fn delete_file(&self, id: &str) -> MetadataResult<()>;
}
