//! Stored file identifiers and the policies that generate them.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use uuid::Uuid;

/// Longest extension carried over from an uploaded filename.
pub const MAX_EXTENSION_LEN: usize = 16;

/// Length of the token part of an identifier (128 bits as lowercase hex).
pub const TOKEN_LEN: usize = 32;

/// Identifier of a stored file.
///
/// The same string is the metadata primary key and the blob name on disk,
/// so it never contains a path separator.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(String);

impl FileId {
    /// Parse an identifier received from a client.
    pub fn parse(s: impl Into<String>) -> crate::Result<Self> {
        let s = s.into();
        if s.is_empty() {
            return Err(crate::Error::InvalidFileId("identifier is empty".to_string()));
        }
        if s.starts_with('.') {
            return Err(crate::Error::InvalidFileId(format!(
                "identifier must not start with '.': {s}"
            )));
        }
        if !s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        {
            return Err(crate::Error::InvalidFileId(format!(
                "identifier contains unsupported characters: {s}"
            )));
        }
        if s.contains("..") {
            return Err(crate::Error::InvalidFileId(format!(
                "identifier must not contain '..': {s}"
            )));
        }
        Ok(Self(s))
    }

    /// Get the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Extension embedded in the identifier, if any.
    pub fn extension(&self) -> Option<&str> {
        self.0.rsplit_once('.').map(|(_, ext)| ext)
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileId({})", self.0)
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FileId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// How candidate identifiers are derived from an uploaded filename.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdPolicy {
    /// 128-bit random token with the filename's extension preserved.
    #[default]
    Random,
    /// SHA-256 of the filename salted with the attempt number, no extension.
    ///
    /// Identical filenames always collide on the first attempt, so every
    /// repeated upload walks the collision loop.
    Digest,
}

impl IdPolicy {
    /// Produce the candidate identifier for the given attempt (0-based).
    pub fn candidate(&self, filename: &str, attempt: u32) -> FileId {
        match self {
            Self::Random => {
                let token = Uuid::new_v4().simple().to_string();
                match extension_of(filename) {
                    Some(ext) => FileId(format!("{token}.{ext}")),
                    None => FileId(token),
                }
            }
            Self::Digest => {
                let mut hasher = Sha256::new();
                hasher.update(filename.as_bytes());
                if attempt > 0 {
                    hasher.update(attempt.to_be_bytes());
                }
                let digest = hasher.finalize();
                let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
                FileId(hex[..TOKEN_LEN].to_string())
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Digest => "digest",
        }
    }
}

/// Extension to carry over from an uploaded filename.
///
/// Returns the lower-cased text after the last `.`, or `None` when there is
/// no dot, the only dot leads the name, or the suffix is not 1 to
/// [`MAX_EXTENSION_LEN`] ASCII alphanumerics.
pub fn extension_of(filename: &str) -> Option<String> {
    // Browsers may send a full client path; only the last component counts.
    let name = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() || ext.len() > MAX_EXTENSION_LEN {
        return None;
    }
    if !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}
