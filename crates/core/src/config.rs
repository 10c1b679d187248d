//! Configuration types shared across crates.

use crate::file_id::IdPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Server configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:10000").
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Public base URL used to render file links (e.g., "https://files.example.com").
    /// Never used for identifiers or storage.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Maximum accepted upload body size in bytes.
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: u64,
    /// Scan for records without blobs (and blobs without records) at startup.
    /// Findings are logged only; nothing is repaired.
    #[serde(default = "default_check_consistency_on_startup")]
    pub check_consistency_on_startup: bool,
}

fn default_bind() -> String {
    "0.0.0.0:10000".to_string()
}

fn default_base_url() -> String {
    "http://localhost:10000".to_string()
}

fn default_max_upload_size() -> u64 {
    crate::DEFAULT_MAX_UPLOAD_SIZE
}

fn default_check_consistency_on_startup() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            base_url: default_base_url(),
            max_upload_size: default_max_upload_size(),
            check_consistency_on_startup: default_check_consistency_on_startup(),
        }
    }
}

impl ServerConfig {
    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Absolute link under which a stored file is served inline.
    pub fn file_url(&self, id: &str) -> String {
        format!("{}/static/file/{}", self.base_url(), id)
    }

    /// Maximum upload size as a `usize`, saturating on 32-bit targets.
    pub fn max_upload_size_usize(&self) -> usize {
        usize::try_from(self.max_upload_size).unwrap_or(usize::MAX)
    }
}

/// Storage backend configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StorageConfig {
    /// Local filesystem storage.
    Filesystem {
        /// Directory holding one file per stored identifier.
        path: PathBuf,
    },
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::Filesystem {
            path: PathBuf::from("./static"),
        }
    }
}

/// Metadata store configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MetadataConfig {
    /// SQLite database.
    Sqlite {
        /// Database file path (":memory:" for an in-memory database).
        path: PathBuf,
    },
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self::Sqlite {
            path: PathBuf::from("./files.db"),
        }
    }
}

/// Identifier allocation configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AllocatorConfig {
    /// Candidate generation policy.
    #[serde(default)]
    pub policy: IdPolicy,
    /// Candidates tried before an upload fails with allocation exhausted.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_max_attempts() -> u32 {
    crate::DEFAULT_MAX_ALLOCATION_ATTEMPTS
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            policy: IdPolicy::default(),
            max_attempts: default_max_attempts(),
        }
    }
}

/// Complete application configuration.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Storage backend configuration.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Metadata store configuration.
    #[serde(default)]
    pub metadata: MetadataConfig,
    /// Identifier allocation configuration.
    #[serde(default)]
    pub allocator: AllocatorConfig,
}

impl AppConfig {
    /// Create a test configuration rooted in `dir`.
    ///
    /// **For testing only.** Uses filesystem storage and SQLite metadata
    /// inside the given directory.
    pub fn for_testing(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            server: ServerConfig {
                check_consistency_on_startup: false,
                ..ServerConfig::default()
            },
            storage: StorageConfig::Filesystem {
                path: dir.join("static"),
            },
            metadata: MetadataConfig::Sqlite {
                path: dir.join("files.db"),
            },
            allocator: AllocatorConfig::default(),
        }
    }

    /// Validate configuration invariants.
    pub fn validate(&self) -> crate::Result<()> {
        let base_url = self.server.base_url();
        if base_url.is_empty() {
            return Err(crate::Error::InvalidConfig(
                "server.base_url must not be empty".to_string(),
            ));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(crate::Error::InvalidConfig(format!(
                "server.base_url must start with http:// or https://, got {base_url}"
            )));
        }
        if self.server.max_upload_size == 0 {
            return Err(crate::Error::InvalidConfig(
                "server.max_upload_size must be greater than 0".to_string(),
            ));
        }
        if self.allocator.max_attempts == 0 {
            return Err(crate::Error::InvalidConfig(
                "allocator.max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_legacy_layout() {
        let config = AppConfig::default();
        assert_eq!(config.server.bind, "0.0.0.0:10000");
        match config.storage {
            StorageConfig::Filesystem { ref path } => assert_eq!(*path, PathBuf::from("./static")),
        }
        match config.metadata {
            MetadataConfig::Sqlite { ref path } => assert_eq!(*path, PathBuf::from("./files.db")),
        }
        assert_eq!(config.allocator.policy, IdPolicy::Random);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_file_url_trims_trailing_slash() {
        let server = ServerConfig {
            base_url: "https://files.example.com/".to_string(),
            ..ServerConfig::default()
        };
        assert_eq!(
            server.file_url("abc.png"),
            "https://files.example.com/static/file/abc.png"
        );
    }

    #[test]
    fn test_validate_rejects_zero_attempts() {
        let mut config = AppConfig::default();
        config.allocator.max_attempts = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("max_attempts"));
    }

    #[test]
    fn test_validate_rejects_base_url_without_scheme() {
        let mut config = AppConfig::default();
        config.server.base_url = "files.example.com".to_string();
        assert!(config.validate().is_err());

        config.server.base_url = "/".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_upload_size() {
        let mut config = AppConfig::default();
        config.server.max_upload_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let json = r#"{
            "server": {"base_url": "https://cdn.example.com"},
            "allocator": {"policy": "digest"}
        }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.server.base_url, "https://cdn.example.com");
        assert_eq!(config.server.bind, "0.0.0.0:10000");
        assert_eq!(config.allocator.policy, IdPolicy::Digest);
        assert_eq!(
            config.allocator.max_attempts,
            crate::DEFAULT_MAX_ALLOCATION_ATTEMPTS
        );
    }

    #[test]
    fn test_storage_config_tagged() {
        let json = r#"{"type":"filesystem","path":"/srv/files"}"#;
        let config: StorageConfig = serde_json::from_str(json).unwrap();
        match config {
            StorageConfig::Filesystem { path } => assert_eq!(path, PathBuf::from("/srv/files")),
        }
    }
}
