//! Record/blob consistency scan.
//!
//! Uploads and deletes touch the metadata store and the blob store in two
//! separate steps, so a failure between them leaves a record without a blob
//! or a blob without a record. The scan reports both kinds; it never repairs.

use filestash_metadata::{MetadataError, MetadataStore};
use filestash_storage::{BlobStore, StorageError};
use serde::Serialize;
use std::collections::HashSet;

/// Errors that stop a scan.
#[derive(Debug, thiserror::Error)]
pub enum ConsistencyError {
    #[error("failed to list records: {0}")]
    Metadata(#[from] MetadataError),

    #[error("failed to list blobs: {0}")]
    Storage(#[from] StorageError),
}

/// Findings of a consistency scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConsistencyReport {
    pub records_checked: usize,
    pub blobs_checked: usize,
    /// Identifiers with a record but no blob, sorted.
    pub missing_blobs: Vec<String>,
    /// Blob names with no record, sorted.
    pub orphaned_blobs: Vec<String>,
}

impl ConsistencyReport {
    pub fn is_consistent(&self) -> bool {
        self.missing_blobs.is_empty() && self.orphaned_blobs.is_empty()
    }

    /// Log each finding at warn and a summary at info.
    pub fn log(&self) {
        for id in &self.missing_blobs {
            tracing::warn!(file_id = %id, "Record has no blob");
        }
        for key in &self.orphaned_blobs {
            tracing::warn!(file_id = %key, "Blob has no record");
        }
        tracing::info!(
            records = self.records_checked,
            blobs = self.blobs_checked,
            missing_blobs = self.missing_blobs.len(),
            orphaned_blobs = self.orphaned_blobs.len(),
            "Consistency scan complete"
        );
    }
}

/// Compare every record against the blob store's listing.
pub async fn scan(
    metadata: &dyn MetadataStore,
    storage: &dyn BlobStore,
) -> Result<ConsistencyReport, ConsistencyError> {
    let records = metadata.list_files().await?;
    let blobs = storage.list().await?;

    let record_ids: HashSet<&str> = records.iter().map(|row| row.id.as_str()).collect();
    let blob_keys: HashSet<&str> = blobs.iter().map(String::as_str).collect();

    let mut missing_blobs: Vec<String> = record_ids
        .difference(&blob_keys)
        .map(|id| id.to_string())
        .collect();
    missing_blobs.sort();

    let mut orphaned_blobs: Vec<String> = blob_keys
        .difference(&record_ids)
        .map(|key| key.to_string())
        .collect();
    orphaned_blobs.sort();

    Ok(ConsistencyReport {
        records_checked: records.len(),
        blobs_checked: blobs.len(),
        missing_blobs,
        orphaned_blobs,
    })
}
