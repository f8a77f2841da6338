// playback and deep-link url derivation

use super::error::LibraryError;
use super::format::MediaFormat;
use super::request::RequestPath;

/// opens a stream in vlc on ios via x-callback-url
pub const MOBILE_PLAYER_SCHEME: &str = "vlc-x-callback";

/// hands a url to a desktop vlc through a helper registered for this scheme
pub const DESKTOP_PLAYER_SCHEME: &str = "vlc-file";

/// scheme and authority the client used to reach the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerOrigin {
    scheme: String,
    authority: String,
}

impl ServerOrigin {
    pub fn new(scheme: impl Into<String>, authority: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            authority: authority.into(),
        }
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }

    pub fn absolute_url(&self, path: &RequestPath) -> String {
        format!("{}://{}{}", self.scheme, self.authority, path.url())
    }
}

/// every link offered for one media file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackLinks {
    /// same-origin url of the raw bytes
    pub file_url: String,
    /// inline html5 player page, only for browser-playable containers
    pub player_url: Option<String>,
    /// mobile deep-link wrapping the absolute file url
    pub mobile_deep_link: String,
    /// desktop hand-off for containers the browser cannot play
    pub desktop_handoff: Option<String>,
}

/// derive the links for the media file at `file`
///
/// the choice between inline and external playback depends on the extension only.
pub fn generate_links(
    origin: &ServerOrigin,
    file: &RequestPath,
) -> Result<PlaybackLinks, LibraryError> {
    let format = file
        .last()
        .and_then(MediaFormat::classify)
        .ok_or_else(|| LibraryError::UnsupportedMedia(file.url()))?;

    let absolute = origin.absolute_url(file);
    let mobile_deep_link = format!("{MOBILE_PLAYER_SCHEME}://x-callback-url/stream?url={absolute}");

    let (player_url, desktop_handoff) = match format {
        MediaFormat::Html5 => (Some(file.player_url()), None),
        MediaFormat::ExternalOnly => (
            None,
            Some(format!(
                "{DESKTOP_PLAYER_SCHEME}://{}{}",
                origin.authority(),
                file.url()
            )),
        ),
    };

    Ok(PlaybackLinks {
        file_url: file.url(),
        player_url,
        mobile_deep_link,
        desktop_handoff,
    })
}
