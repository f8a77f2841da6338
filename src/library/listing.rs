// child enumeration for a visible directory

use std::cmp::Ordering;
use std::path::Path;
use tokio::fs;
use tracing::{debug, warn};

use super::error::LibraryError;
use super::format::MediaFormat;
use super::manifest::{load_manifest, Manifest, MediaKind};
use super::request::RequestPath;
use super::resolve::ResolvedDirectory;
use crate::utils::{files::is_hidden, paths::ensure_within_root};

/// what a listed child is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    Directory(MediaKind),
    Media(MediaFormat),
}

/// one listable child of a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaEntry {
    /// file or directory name on disk
    pub name: String,
    /// manifest title for directories, the file name for media
    pub title: String,
    pub url: RequestPath,
    pub kind: EntryKind,
}

impl MediaEntry {
    pub fn is_dir(&self) -> bool {
        matches!(self.kind, EntryKind::Directory(_))
    }

    fn directory(parent: &RequestPath, name: String, manifest: &Manifest) -> Self {
        Self {
            title: manifest.display_title(&name).to_string(),
            url: parent.join(&name),
            kind: EntryKind::Directory(manifest.kind),
            name,
        }
    }

    fn media(parent: &RequestPath, name: String, format: MediaFormat) -> Self {
        Self {
            title: name.clone(),
            url: parent.join(&name),
            kind: EntryKind::Media(format),
            name,
        }
    }
}

/// enumerate the immediate children of a visible directory
///
/// sub-directories need a valid manifest of their own and files need a media
/// extension; everything else is left out. Directories sort before files, each
/// group by name. Children whose real location lies outside `media_root` are skipped.
pub async fn build_listing(
    media_root: &Path,
    dir: &ResolvedDirectory,
) -> Result<Vec<MediaEntry>, LibraryError> {
    let mut entries = Vec::new();
    let mut read_dir = fs::read_dir(&dir.fs_path).await?;

    while let Some(entry) = read_dir.next_entry().await? {
        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                warn!("skipping non utf-8 name in {}: {:?}", dir.url, raw);
                continue;
            }
        };

        if is_hidden(&name) {
            continue;
        }

        // follow symlinks so linked media behaves like the real thing, inside the root only
        let path = match ensure_within_root(media_root, &entry.path()) {
            Ok(path) => path,
            Err(e) => {
                debug!("omitting {}: {}", name, e);
                continue;
            }
        };
        let metadata = match fs::metadata(&path).await {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!("skipping unreadable entry {}: {}", path.display(), e);
                continue;
            }
        };

        if metadata.is_dir() {
            match load_manifest(&path).await {
                Ok(Some(manifest)) => entries.push(MediaEntry::directory(&dir.url, name, &manifest)),
                Ok(None) => debug!("omitting unmanifested directory {}", path.display()),
                Err(e) => warn!("omitting directory with unusable manifest: {}", e),
            }
        } else if metadata.is_file() {
            if let Some(format) = MediaFormat::classify(&name) {
                entries.push(MediaEntry::media(&dir.url, name, format));
            }
        }
    }

    entries.sort_by(listing_order);
    Ok(entries)
}

/// directories first, then by name
pub fn listing_order(a: &MediaEntry, b: &MediaEntry) -> Ordering {
    b.is_dir()
        .cmp(&a.is_dir())
        .then_with(|| a.name.cmp(&b.name))
}
