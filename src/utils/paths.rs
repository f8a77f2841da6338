// url segment decoding and media-root jail checks

use percent_encoding::percent_decode_str;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PathError {
    #[error("invalid encoding in path segment")]
    InvalidEncoding,

    #[error("traversal segment rejected: {0:?}")]
    Traversal(String),

    #[error("invalid media root: {0}")]
    InvalidRoot(PathBuf),

    #[error("path outside media root: root={root:?}, target={target:?}")]
    OutsideRoot { root: PathBuf, target: PathBuf },
}

/// percent-decode one url path segment and reject anything that is not a plain name
///
/// a decoded segment must name exactly one filesystem entry: `.`, `..`, separators and
/// nul bytes are all traversal attempts, whether they arrived literally or encoded
pub fn decode_segment(raw: &str) -> Result<String, PathError> {
    let decoded = percent_decode_str(raw)
        .decode_utf8()
        .map_err(|_| PathError::InvalidEncoding)?;

    if decoded == "." || decoded == ".." || decoded.contains(&['/', '\\', '\0'][..]) {
        return Err(PathError::Traversal(decoded.into_owned()));
    }

    Ok(decoded.into_owned())
}

/// ensure an existing path still lives under the media root once symlinks are resolved
pub fn ensure_within_root(root: &Path, target: &Path) -> Result<PathBuf, PathError> {
    let canonical_root = root
        .canonicalize()
        .map_err(|_| PathError::InvalidRoot(root.to_path_buf()))?;

    let canonical_target = target.canonicalize().map_err(|_| PathError::OutsideRoot {
        root: canonical_root.clone(),
        target: target.to_path_buf(),
    })?;

    if !canonical_target.starts_with(&canonical_root) {
        return Err(PathError::OutsideRoot {
            root: canonical_root,
            target: canonical_target,
        });
    }

    Ok(canonical_target)
}
