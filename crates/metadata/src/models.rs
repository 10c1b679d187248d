//! Database models mapping to the metadata schema.

use sqlx::FromRow;

/// One stored file: its identifier and the filename it was uploaded under.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct FileRow {
    /// Primary key; also the blob name in the blob store.
    pub id: String,
    /// Client-supplied filename. Not unique, display only.
    pub filename: String,
}

impl FileRow {
    pub fn new(id: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            filename: filename.into(),
        }
    }
}
