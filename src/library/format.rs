// container allow-lists

use crate::utils::files::extension_of;

/// every extension listed and served as media
pub const MEDIA_EXTENSIONS: &[&str] = &[
    "avi", "flv", "wmv", "mpg", "mpeg", "mp2", "mp4", "m4v", "ogg", "ogm", "ogv", "webm", "mkv",
    "mov",
];

/// extensions an html5 `<video>` element can play inline
pub const HTML5_EXTENSIONS: &[&str] = &["mp4", "m4v", "ogg", "ogm", "ogv", "webm"];

/// how a media file can be played
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaFormat {
    /// playable inline by the browser
    Html5,
    /// only playable by handing the url to an external player
    ExternalOnly,
}

impl MediaFormat {
    /// classify a file name; `None` for anything outside the media allow-list
    pub fn classify(file_name: &str) -> Option<Self> {
        let ext = extension_of(file_name)?;
        if HTML5_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::Html5)
        } else if MEDIA_EXTENSIONS.contains(&ext.as_str()) {
            Some(Self::ExternalOnly)
        } else {
            None
        }
    }

    pub fn is_inline_playable(self) -> bool {
        self == Self::Html5
    }
}
