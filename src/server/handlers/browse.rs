// library browsing: directory pages, player pages and raw media delivery

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderMap},
    response::{Html, IntoResponse, Response},
};
use std::convert::Infallible;
use tower::ServiceExt;
use tower_http::services::ServeFile;
use tracing::{debug, info, instrument};

use crate::config::AppConfig;
use crate::library::{
    build_listing, generate_links, resolve, FileView, LibraryError, RequestPath, Resolved,
    ResolvedFile, ServerOrigin,
};
use crate::server::{app::AppState, pages};

const FORWARDED_PROTO: &str = "x-forwarded-proto";

/// resolve any library path and answer with a listing, a player page or the file itself
#[instrument(skip_all, fields(path = %request.uri().path()))]
pub async fn handle_browse(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, LibraryError> {
    info!("processing request");

    let path = RequestPath::parse(request.uri().path())?;
    let origin = request_origin(request.headers(), &state.config);

    match resolve(state.config.media_dir(), &path).await? {
        Resolved::Directory(dir) => {
            let entries = build_listing(state.config.media_dir(), &dir).await?;
            debug!("listing {} with {} entries", dir.url, entries.len());
            Ok(Html(pages::directory_page(&dir, &entries, &origin)?).into_response())
        }
        Resolved::File(file) => match file.view {
            FileView::Player => {
                let links = generate_links(&origin, &file.url)?;
                info!("serving player page for {}", file.url);
                Ok(Html(pages::player_page(&file, &links)).into_response())
            }
            FileView::Raw => serve_media_file(&file, request).await,
        },
    }
}

/// stream the bytes of a media file, with range support
async fn serve_media_file(file: &ResolvedFile, request: Request) -> Result<Response, LibraryError> {
    info!("streaming file: {}", file.fs_path.display());

    let response = ServeFile::new(&file.fs_path)
        .oneshot(request)
        .await
        .unwrap_or_else(|never: Infallible| match never {});

    Ok(response.map(Body::new))
}

/// scheme and authority the client reached us on, for absolute deep-link urls
pub fn request_origin(headers: &HeaderMap, config: &AppConfig) -> ServerOrigin {
    let authority = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .filter(|host| !host.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| config.listen_authority());

    let scheme = headers
        .get(FORWARDED_PROTO)
        .and_then(|value| value.to_str().ok())
        .filter(|proto| matches!(*proto, "http" | "https"))
        .unwrap_or("http");

    ServerOrigin::new(scheme, authority)
}
