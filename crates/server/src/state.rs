//! Application state shared across handlers.

use filestash_core::config::AppConfig;
use filestash_metadata::{IdAllocator, MetadataStore};
use filestash_storage::BlobStore;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Blob storage backend.
    pub storage: Arc<dyn BlobStore>,
    /// Metadata store.
    pub metadata: Arc<dyn MetadataStore>,
    /// Identifier allocator, built from `config.allocator`.
    pub allocator: IdAllocator,
}

impl AppState {
    /// Create a new application state.
    pub fn new(
        config: AppConfig,
        storage: Arc<dyn BlobStore>,
        metadata: Arc<dyn MetadataStore>,
    ) -> Self {
        let allocator = IdAllocator::from_config(&config.allocator);
        tracing::debug!(
            policy = allocator.policy().as_str(),
            max_attempts = allocator.max_attempts(),
            "Identifier allocator configured"
        );

        Self {
            config: Arc::new(config),
            storage,
            metadata,
            allocator,
        }
    }
}
