//! Blob store test utilities.

use async_trait::async_trait;
use bytes::Bytes;
use filestash_storage::{BlobStore, FilesystemBackend, StorageError, StorageResult};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tempfile::TempDir;

/// A test storage wrapper that cleans up on drop.
/// Note: #[allow(dead_code)] because each test file compiles common/ separately.
#[allow(dead_code)]
pub struct TestStorage {
    pub backend: Arc<FilesystemBackend>,
    _temp_dir: TempDir,
}

#[allow(dead_code)]
impl TestStorage {
    /// Create a new test storage with a temporary directory.
    pub async fn new() -> StorageResult<Self> {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let backend = FilesystemBackend::new(temp_dir.path()).await?;

        Ok(Self {
            backend: Arc::new(backend),
            _temp_dir: temp_dir,
        })
    }

    /// Get a reference to the blob store.
    pub fn store(&self) -> Arc<dyn BlobStore> {
        self.backend.clone()
    }
}

/// Blob store that delegates to a real backend but can be told to fail
/// writes or deletes, and counts every call.
#[allow(dead_code)]
pub struct FaultyStore {
    inner: Arc<dyn BlobStore>,
    fail_put: AtomicBool,
    fail_delete: AtomicBool,
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl FaultyStore {
    pub fn new(inner: Arc<dyn BlobStore>) -> Self {
        Self {
            inner,
            fail_put: AtomicBool::new(false),
            fail_delete: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn fail_puts(&self, fail: bool) {
        self.fail_put.store(fail, Ordering::SeqCst);
    }

    pub fn fail_deletes(&self, fail: bool) {
        self.fail_delete.store(fail, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn injected(op: &str) -> StorageError {
        StorageError::Io(std::io::Error::other(format!("injected {op} failure")))
    }
}

#[async_trait]
impl BlobStore for FaultyStore {
    async fn exists(&self, key: &str) -> StorageResult<bool> {
        self.record();
        self.inner.exists(key).await
    }

    async fn get(&self, key: &str) -> StorageResult<Bytes> {
        self.record();
        self.inner.get(key).await
    }

    async fn put(&self, key: &str, data: Bytes) -> StorageResult<()> {
        self.record();
        if self.fail_put.load(Ordering::SeqCst) {
            return Err(Self::injected("put"));
        }
        self.inner.put(key, data).await
    }

    async fn delete(&self, key: &str) -> StorageResult<()> {
        self.record();
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(Self::injected("delete"));
        }
        self.inner.delete(key).await
    }

    async fn list(&self) -> StorageResult<Vec<String>> {
        self.record();
        self.inner.list().await
    }

    fn backend_name(&self) -> &'static str {
        "faulty"
    }
}
