// embedded static asset handlers

use axum::{
    body::Body,
    extract::Path,
    http::{header, StatusCode},
    response::Response,
};
use rust_embed::RustEmbed;
use tracing::{debug, warn};

use crate::utils::files::get_mime_type;

#[derive(RustEmbed)]
#[folder = "assets/"]
#[include = "*.css"]
pub struct StaticAssets;

/// serve embedded static assets
pub async fn serve_static_asset(Path(asset_path): Path<String>) -> Result<Response, StatusCode> {
    debug!("serving static asset: {}", asset_path);

    let asset = StaticAssets::get(&asset_path).ok_or_else(|| {
        warn!("static asset not found: {}", asset_path);
        StatusCode::NOT_FOUND
    })?;

    Response::builder()
        .status(StatusCode::OK)
        .header(
            header::CONTENT_TYPE,
            get_mime_type(std::path::Path::new(&asset_path)),
        )
        .header(header::CACHE_CONTROL, "public, max-age=86400")
        .header(header::CONTENT_LENGTH, asset.data.len())
        .body(Body::from(asset.data.into_owned()))
        .map_err(|e| {
            warn!("failed to build asset response: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })
}
