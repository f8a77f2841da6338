// error taxonomy for manifest loading, path resolution and link generation

use std::path::PathBuf;
use thiserror::Error;

use crate::utils::paths::PathError;

#[derive(Debug, Error)]
pub enum LibraryError {
    /// missing path, unmanifested directory, non-media file or traversal attempt
    #[error("not found: {0}")]
    NotFound(String),

    /// a manifest exists but cannot be used; this is an operator mistake
    #[error("malformed manifest {}: {reason}", .path.display())]
    MalformedManifest { path: PathBuf, reason: String },

    #[error("unsupported media type: {0}")]
    UnsupportedMedia(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl LibraryError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }
}

impl From<PathError> for LibraryError {
    fn from(err: PathError) -> Self {
        Self::NotFound(err.to_string())
    }
}
