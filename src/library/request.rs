// url path segments of an incoming request

use std::fmt;

use super::error::LibraryError;
use crate::utils::paths::decode_segment;

/// trailing segment selecting the playback page of a file
pub const PLAYER_SEGMENT: &str = "player";

/// decoded, traversal-free segments of a request path
///
/// segments map 1:1 onto directory and file names under the media root. Names are
/// expected to be url-safe already, so rendering never escapes or rewrites them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestPath {
    segments: Vec<String>,
}

impl RequestPath {
    pub fn root() -> Self {
        Self::default()
    }

    /// parse the path component of a request uri; empty segments are dropped
    pub fn parse(raw: &str) -> Result<Self, LibraryError> {
        let segments = raw
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(decode_segment)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    pub fn join(&self, name: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        Self { segments }
    }

    /// absolute url path, always `/`-separated
    pub fn url(&self) -> String {
        if self.segments.is_empty() {
            "/".to_string()
        } else {
            format!("/{}", self.segments.join("/"))
        }
    }

    /// url of the playback page for the file at this path
    pub fn player_url(&self) -> String {
        self.join(PLAYER_SEGMENT).url()
    }

    /// every prefix of this path paired with its last segment, root excluded
    pub fn ancestors(&self) -> impl Iterator<Item = (Self, &str)> + '_ {
        self.segments.iter().enumerate().map(|(i, name)| {
            let prefix = Self {
                segments: self.segments[..=i].to_vec(),
            };
            (prefix, name.as_str())
        })
    }
}

impl fmt::Display for RequestPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_drops_empty_segments() {
        let path = RequestPath::parse("/movies//godfather-part-ii/").unwrap();
        assert_eq!(path.segments(), ["movies", "godfather-part-ii"]);
        assert_eq!(path.url(), "/movies/godfather-part-ii");
    }

    #[test]
    fn test_root() {
        let path = RequestPath::parse("/").unwrap();
        assert!(path.is_root());
        assert_eq!(path.url(), "/");
        assert_eq!(path, RequestPath::root());
    }

    #[test]
    fn test_join_always_inserts_separator() {
        let series = RequestPath::parse("/tv/rick-and-morty").unwrap();
        let episode = series.join("rick-and-morty-s1e1.mkv");
        assert_eq!(episode.url(), "/tv/rick-and-morty/rick-and-morty-s1e1.mkv");
        assert_eq!(
            episode.player_url(),
            "/tv/rick-and-morty/rick-and-morty-s1e1.mkv/player"
        );
        assert_eq!(RequestPath::root().join("tv").url(), "/tv");
    }

    #[test]
    fn test_traversal_is_rejected() {
        assert!(matches!(
            RequestPath::parse("/movies/../../etc/passwd"),
            Err(LibraryError::NotFound(_))
        ));
        assert!(RequestPath::parse("/movies/%2e%2e/secret").is_err());
    }

    #[test]
    fn test_ancestors() {
        let path = RequestPath::parse("/tv/rick-and-morty").unwrap();
        let crumbs: Vec<_> = path
            .ancestors()
            .map(|(prefix, name)| (prefix.url(), name.to_string()))
            .collect();
        assert_eq!(
            crumbs,
            vec![
                ("/tv".to_string(), "tv".to_string()),
                ("/tv/rick-and-morty".to_string(), "rick-and-morty".to_string()),
            ]
        );
    }
}
