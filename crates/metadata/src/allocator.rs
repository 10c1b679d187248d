//! Identifier allocation.
//!
//! Candidates come from an [`IdPolicy`]; each one is checked against the
//! repository and then inserted. The insert itself is the final guard: if
//! another request claimed the same identifier between the check and the
//! insert, the repository reports `AlreadyExists` and the next candidate is
//! tried.

use crate::error::{MetadataError, MetadataResult};
use crate::models::FileRow;
use crate::repos::FileRepo;
use filestash_core::IdPolicy;
use filestash_core::config::AllocatorConfig;
use tracing::{debug, warn};

/// Allocates unused identifiers and records them with their filename.
#[derive(Clone, Debug)]
pub struct IdAllocator {
    policy: IdPolicy,
    max_attempts: u32,
}

impl IdAllocator {
    /// Create an allocator. `max_attempts` is clamped to at least 1.
    pub fn new(policy: IdPolicy, max_attempts: u32) -> Self {
        Self {
            policy,
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn from_config(config: &AllocatorConfig) -> Self {
        Self::new(config.policy, config.max_attempts)
    }

    pub fn policy(&self) -> IdPolicy {
        self.policy
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Pick an identifier no existing record uses and insert a record for it.
    ///
    /// On success the returned row is already persisted. Repository errors
    /// other than a key conflict abort the allocation.
    pub async fn allocate<R>(&self, repo: &R, filename: &str) -> MetadataResult<FileRow>
    where
        R: FileRepo + ?Sized,
    {
        for attempt in 0..self.max_attempts {
            let candidate = self.policy.candidate(filename, attempt);

            if repo.file_exists(candidate.as_str()).await? {
                debug!(id = %candidate, attempt, "identifier already in use");
                continue;
            }

            let row = FileRow::new(candidate.into_string(), filename);
            match repo.create_file(&row).await {
                Ok(()) => {
                    debug!(id = %row.id, attempt, "identifier allocated");
                    return Ok(row);
                }
                Err(MetadataError::AlreadyExists(_)) => {
                    debug!(id = %row.id, attempt, "identifier claimed concurrently");
                    continue;
                }
                Err(e) => return Err(e),
            }
        }

        warn!(
            filename,
            attempts = self.max_attempts,
            policy = self.policy.as_str(),
            "identifier allocation exhausted"
        );
        Err(MetadataError::AllocationExhausted {
            filename: filename.to_string(),
            attempts: self.max_attempts,
        })
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::from_config(&AllocatorConfig::default())
    }
}
