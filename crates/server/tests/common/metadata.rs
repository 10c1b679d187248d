//! Metadata store test utilities.

use async_trait::async_trait;
use filestash_metadata::{FileRepo, FileRow, MetadataResult, MetadataStore, SqliteStore};
use sqlx::{Pool, Sqlite};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

/// A test metadata store wrapper that cleans up on drop.
#[allow(dead_code)]
pub struct TestMetadata {
    pub store: Arc<dyn MetadataStore>,
    pub(crate) sqlite_store: Arc<SqliteStore>,
    _temp_dir: TempDir,
}

#[allow(dead_code)]
impl TestMetadata {
    /// Create a new file-backed SQLite store in a temporary directory.
    pub async fn new() -> MetadataResult<Self> {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("files.db");
        let store = SqliteStore::new(&db_path).await?;
        let arc_store = Arc::new(store);

        Ok(Self {
            store: arc_store.clone(),
            sqlite_store: arc_store,
            _temp_dir: temp_dir,
        })
    }

    /// Get a reference to the metadata store.
    pub fn store(&self) -> Arc<dyn MetadataStore> {
        self.store.clone()
    }

    /// Get a reference to the SQLite connection pool for raw queries.
    pub fn pool(&self) -> &Pool<Sqlite> {
        self.sqlite_store.pool()
    }
}

/// Metadata store that counts every call before delegating.
#[allow(dead_code)]
pub struct CountingMetadata {
    inner: Arc<dyn MetadataStore>,
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl CountingMetadata {
    pub fn new(inner: Arc<dyn MetadataStore>) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl FileRepo for CountingMetadata {
    async fn file_exists(&self, id: &str) -> MetadataResult<bool> {
        self.record();
        self.inner.file_exists(id).await
    }

    async fn create_file(&self, file: &FileRow) -> MetadataResult<()> {
        self.record();
        self.inner.create_file(file).await
    }

    async fn get_file(&self, id: &str) -> MetadataResult<Option<FileRow>> {
        self.record();
        self.inner.get_file(id).await
    }

    async fn list_files(&self) -> MetadataResult<Vec<FileRow>> {
        self.record();
        self.inner.list_files().await
    }

    async fn delete_file(&self, id: &str) -> MetadataResult<()> {
        self.record();
        self.inner.delete_file(id).await
    }
}

#[async_trait]
impl MetadataStore for CountingMetadata {
    async fn migrate(&self) -> MetadataResult<()> {
        self.inner.migrate().await
    }

    async fn health_check(&self) -> MetadataResult<()> {
        self.inner.health_check().await
    }
}
