//! Blob storage abstraction and backends for filestash.
//!
//! This crate provides:
//! - The `BlobStore` trait: verbatim byte storage keyed by file identifier
//! - A local filesystem backend with atomic writes

pub mod backends;
pub mod error;
pub mod traits;

pub use backends::filesystem::FilesystemBackend;
pub use error::{StorageError, StorageResult};
pub use traits::BlobStore;

use filestash_core::config::StorageConfig;
use std::sync::Arc;

/// Create a blob store from configuration.
pub async fn from_config(config: &StorageConfig) -> StorageResult<Arc<dyn BlobStore>> {
    match config {
        StorageConfig::Filesystem { path } => {
            let backend = FilesystemBackend::new(path).await?;
            Ok(Arc::new(backend) as Arc<dyn BlobStore>)
        }
    }
}
