//! Server test utilities.

use filestash_core::config::AppConfig;
use filestash_metadata::MetadataStore;
use filestash_server::{AppState, create_router};
use filestash_storage::BlobStore;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

/// A test server wrapper with all dependencies.
/// Note: #[allow(dead_code)] because each test file compiles common/ separately.
#[allow(dead_code)]
pub struct TestServer {
    pub router: axum::Router,
    pub state: AppState,
    _temp_dir: TempDir,
}

#[allow(dead_code)]
impl TestServer {
    /// Create a new test server with a temporary blob directory and database.
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Create a test server with custom config modifications.
    pub async fn with_config<F>(modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let mut config = AppConfig::for_testing(temp_dir.path());
        modifier(&mut config);

        let storage = filestash_storage::from_config(&config.storage)
            .await
            .expect("Failed to create storage backend");
        let metadata = filestash_metadata::from_config(&config.metadata)
            .await
            .expect("Failed to create metadata store");

        Self::assemble(temp_dir, config, storage, metadata)
    }

    /// Create a test server over caller-supplied stores.
    pub async fn with_stores(
        storage: Arc<dyn BlobStore>,
        metadata: Arc<dyn MetadataStore>,
    ) -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let config = AppConfig::for_testing(temp_dir.path());
        Self::assemble(temp_dir, config, storage, metadata)
    }

    fn assemble(
        temp_dir: TempDir,
        config: AppConfig,
        storage: Arc<dyn BlobStore>,
        metadata: Arc<dyn MetadataStore>,
    ) -> Self {
        let state = AppState::new(config, storage, metadata);
        let router = create_router(state.clone());

        Self {
            router,
            state,
            _temp_dir: temp_dir,
        }
    }

    /// Get access to the underlying metadata.
    pub fn metadata(&self) -> Arc<dyn MetadataStore> {
        self.state.metadata.clone()
    }

    /// Get access to the underlying blob store.
    pub fn storage(&self) -> Arc<dyn BlobStore> {
        self.state.storage.clone()
    }

    /// Directory holding blobs when the default filesystem backend is in use.
    pub fn blob_dir(&self) -> PathBuf {
        self._temp_dir.path().join("static")
    }
}
