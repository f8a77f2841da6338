// request path to filesystem resolution with manifest-gated visibility

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

use super::error::LibraryError;
use super::format::MediaFormat;
use super::manifest::{load_manifest, Manifest};
use super::request::{RequestPath, PLAYER_SEGMENT};
use crate::utils::{files::is_hidden, paths::ensure_within_root};

/// a directory that, together with all of its ancestors, carries a manifest
#[derive(Debug, Clone)]
pub struct ResolvedDirectory {
    pub fs_path: PathBuf,
    pub url: RequestPath,
    pub manifest: Manifest,
}

impl ResolvedDirectory {
    /// slug of the directory, empty for the media root
    pub fn slug(&self) -> &str {
        self.url.last().unwrap_or("")
    }

    pub fn title(&self) -> &str {
        self.manifest.display_title(self.slug())
    }
}

/// which response a file request asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileView {
    /// the bytes of the file
    Raw,
    /// the playback page (`.../<file>/player`)
    Player,
}

/// a media file inside a visible directory
#[derive(Debug, Clone)]
pub struct ResolvedFile {
    pub fs_path: PathBuf,
    /// url of the file itself, without any `/player` suffix
    pub url: RequestPath,
    pub name: String,
    pub format: MediaFormat,
    pub view: FileView,
    pub parent: ResolvedDirectory,
}

#[derive(Debug, Clone)]
pub enum Resolved {
    Directory(ResolvedDirectory),
    File(ResolvedFile),
}

/// resolve a request path under the media root
///
/// every directory on the way down must carry a manifest; the first one that does
/// not ends resolution even when deeper segments exist on disk. A file may only be
/// followed by a single `player` segment.
pub async fn resolve(media_root: &Path, request: &RequestPath) -> Result<Resolved, LibraryError> {
    let not_found = || LibraryError::not_found(request.url());

    let mut dir = visible_directory(media_root, media_root.to_path_buf(), RequestPath::root())
        .await?
        .ok_or_else(not_found)?;

    let segments = request.segments();
    for (index, segment) in segments.iter().enumerate() {
        if is_hidden(segment) {
            debug!("hidden segment requested: {}", segment);
            return Err(not_found());
        }

        let candidate = dir.fs_path.join(segment);
        let metadata = match fs::metadata(&candidate).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(not_found()),
            Err(e) => return Err(e.into()),
        };

        if metadata.is_dir() {
            let url = dir.url.join(segment);
            dir = visible_directory(media_root, candidate, url)
                .await?
                .ok_or_else(not_found)?;
            continue;
        }

        if !metadata.is_file() {
            return Err(not_found());
        }

        let view = match &segments[index + 1..] {
            [] => FileView::Raw,
            [last] if last == PLAYER_SEGMENT => FileView::Player,
            _ => return Err(not_found()),
        };

        let Some(format) = MediaFormat::classify(segment) else {
            debug!("not a media file: {}", candidate.display());
            return Err(not_found());
        };

        let fs_path = ensure_within_root(media_root, &candidate)?;
        let url = dir.url.join(segment);
        return Ok(Resolved::File(ResolvedFile {
            fs_path,
            url,
            name: segment.clone(),
            format,
            view,
            parent: dir,
        }));
    }

    Ok(Resolved::Directory(dir))
}

/// check a directory against the media root jail and load its manifest
async fn visible_directory(
    media_root: &Path,
    fs_path: PathBuf,
    url: RequestPath,
) -> Result<Option<ResolvedDirectory>, LibraryError> {
    let fs_path = ensure_within_root(media_root, &fs_path)?;

    let Some(manifest) = load_manifest(&fs_path).await? else {
        debug!("directory without manifest: {}", fs_path.display());
        return Ok(None);
    };

    Ok(Some(ResolvedDirectory {
        fs_path,
        url,
        manifest,
    }))
}
