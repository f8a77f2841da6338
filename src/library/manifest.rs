// per-directory manifest loading and classification

use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;
use tracing::debug;

use super::error::LibraryError;

/// name of the descriptor file that makes a directory visible
pub const MANIFEST_FILE: &str = "mserve.json";

/// role of a visible directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Directory,
    Movie,
    Series,
}

impl MediaKind {
    /// movies and series hold playable media rather than further organization
    pub fn is_show(self) -> bool {
        matches!(self, MediaKind::Movie | MediaKind::Series)
    }
}

/// parsed contents of an `mserve.json`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Manifest {
    #[serde(rename = "type")]
    pub kind: MediaKind,
    #[serde(default)]
    pub title: Option<String>,
    /// themoviedb.org reference such as `movie/238` or `tv/1396`
    #[serde(default)]
    pub tmdb_id: Option<String>,
}

impl Manifest {
    /// manifest title, falling back to the directory slug
    pub fn display_title<'a>(&'a self, slug: &'a str) -> &'a str {
        self.title.as_deref().unwrap_or(slug)
    }

    /// outbound themoviedb.org link, when the manifest names one
    pub fn tmdb_url(&self) -> Option<String> {
        self.tmdb_id
            .as_deref()
            .map(|id| format!("https://www.themoviedb.org/{}", id.trim_matches('/')))
    }

    pub fn parse(path: &Path, contents: &str) -> Result<Self, LibraryError> {
        serde_json::from_str(contents).map_err(|e| LibraryError::MalformedManifest {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

/// read the manifest of a directory
///
/// `Ok(None)` means the directory is invisible. The filesystem is read on every call.
pub async fn load_manifest(dir: &Path) -> Result<Option<Manifest>, LibraryError> {
    let manifest_path = dir.join(MANIFEST_FILE);

    let contents = match fs::read_to_string(&manifest_path).await {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("no manifest in {}", dir.display());
            return Ok(None);
        }
        Err(e) if e.kind() == ErrorKind::InvalidData => {
            return Err(LibraryError::MalformedManifest {
                path: manifest_path,
                reason: "not valid utf-8".to_string(),
            });
        }
        Err(e) => {
            let is_dir = fs::metadata(&manifest_path)
                .await
                .map(|metadata| metadata.is_dir())
                .unwrap_or(false);
            if is_dir {
                debug!("manifest path is a directory: {} ({})", manifest_path.display(), e);
                return Ok(None);
            }
            return Err(e.into());
        }
    };

    Manifest::parse(&manifest_path, &contents).map(Some)
}
