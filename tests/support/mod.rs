// shared test helpers
#![allow(dead_code)] // helpers are shared across multiple integration test crates

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use mserve::{
    config::{AppConfig, ServerConfig},
    library::MANIFEST_FILE,
    server::app::create_test_app,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const HOST: &str = "mediabox.local:8000";

pub fn base_config(media_dir: &Path) -> AppConfig {
    AppConfig {
        server: ServerConfig {
            media_dir: media_dir.to_path_buf(),
            ..Default::default()
        },
    }
}

pub fn app(config: AppConfig) -> axum::Router {
    create_test_app(config)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(header::HOST, HOST)
        .body(Body::empty())
        .unwrap()
}

pub fn get_with_range(uri: &str, range: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(header::HOST, HOST)
        .header(header::RANGE, range)
        .body(Body::empty())
        .unwrap()
}

pub fn head(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::HEAD)
        .uri(uri)
        .header(header::HOST, HOST)
        .body(Body::empty())
        .unwrap()
}

pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// on-disk media library built up for a single test
pub struct Library {
    dir: TempDir,
}

impl Library {
    /// an empty library whose root is visible
    pub fn new() -> Self {
        let library = Self::without_root_manifest();
        library.manifest("", r#"{"type": "directory"}"#);
        library
    }

    pub fn without_root_manifest() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// write a raw manifest body into `rel`, creating the directory
    pub fn manifest(&self, rel: &str, body: &str) -> &Self {
        let dir = self.path(rel);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(MANIFEST_FILE), body).unwrap();
        self
    }

    pub fn directory(&self, rel: &str, title: Option<&str>) -> &Self {
        self.manifest(rel, &manifest_body("directory", title))
    }

    pub fn movie(&self, rel: &str, title: &str) -> &Self {
        self.manifest(rel, &manifest_body("movie", Some(title)))
    }

    pub fn series(&self, rel: &str, title: &str) -> &Self {
        self.manifest(rel, &manifest_body("series", Some(title)))
    }

    /// a directory on disk with no manifest
    pub fn bare_dir(&self, rel: &str) -> &Self {
        fs::create_dir_all(self.path(rel)).unwrap();
        self
    }

    pub fn file(&self, rel: &str, contents: &str) -> &Self {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, contents).unwrap();
        self
    }

    pub fn app(&self) -> axum::Router {
        app(base_config(self.root()))
    }
}

fn manifest_body(kind: &str, title: Option<&str>) -> String {
    match title {
        Some(title) => serde_json::json!({ "type": kind, "title": title }).to_string(),
        None => serde_json::json!({ "type": kind }).to_string(),
    }
}

/// the godfather / rick and morty library used across suites
pub fn sample_library() -> Library {
    let library = Library::new();
    library
        .directory("movies", Some("Movies"))
        .movie("movies/godfather-part-ii", "The Godfather Part II")
        .file(
            "movies/godfather-part-ii/godfather-part-ii.mp4",
            "godfather bytes",
        )
        .directory("tv", Some("TV"))
        .series("tv/rick-and-morty", "Rick and Morty")
        .file("tv/rick-and-morty/rick-and-morty-s1e1.mkv", "episode one")
        .file("tv/rick-and-morty/rick-and-morty-s1e2.mkv", "episode two");
    library
}
