//! Metadata store and identifier allocation for filestash.
//!
//! This crate owns the record of which identifiers exist:
//! - The `files` table mapping identifier to uploaded filename
//! - Allocation of fresh identifiers against that table

pub mod allocator;
pub mod error;
pub mod models;
pub mod repos;
pub mod store;

pub use allocator::IdAllocator;
pub use error::{MetadataError, MetadataResult};
pub use models::FileRow;
pub use repos::FileRepo;
pub use store::{MetadataStore, SqliteStore};

use filestash_core::config::MetadataConfig;
use std::sync::Arc;

/// Create a metadata store from configuration.
pub async fn from_config(config: &MetadataConfig) -> MetadataResult<Arc<dyn MetadataStore>> {
    match config {
        MetadataConfig::Sqlite { path } => {
            tracing::info!(path = %path.display(), "Opening SQLite metadata store");
            let store = SqliteStore::new(path).await?;
            Ok(Arc::new(store) as Arc<dyn MetadataStore>)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use filestash_core::config::MetadataConfig;

    #[tokio::test]
    async fn test_from_config_sqlite() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("files.db");
        let config = MetadataConfig::Sqlite {
            path: db_path.clone(),
        };

        let store = from_config(&config).await.unwrap();
        store.health_check().await.unwrap();
        assert!(db_path.exists());
        assert!(store.list_files().await.unwrap().is_empty());
    }
}
