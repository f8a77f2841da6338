//! the media library: manifests, path resolution, listings and playback links
//!
//! nothing here is cached; every call reads the filesystem, which is the only
//! source of truth.

pub mod error;
pub mod format;
pub mod links;
pub mod listing;
pub mod manifest;
pub mod request;
pub mod resolve;

pub use error::LibraryError;
pub use format::MediaFormat;
pub use links::{generate_links, PlaybackLinks, ServerOrigin};
pub use listing::{build_listing, EntryKind, MediaEntry};
pub use manifest::{load_manifest, Manifest, MediaKind, MANIFEST_FILE};
pub use request::{RequestPath, PLAYER_SEGMENT};
pub use resolve::{resolve, FileView, Resolved, ResolvedDirectory, ResolvedFile};
