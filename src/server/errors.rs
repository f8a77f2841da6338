// http mapping for library errors

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use crate::library::LibraryError;

impl IntoResponse for LibraryError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            LibraryError::NotFound(what) => {
                warn!("not found: {}", what);
                (StatusCode::NOT_FOUND, "Not found".to_string())
            }
            LibraryError::UnsupportedMedia(what) => {
                warn!("unsupported media requested: {}", what);
                (StatusCode::NOT_FOUND, "Not found".to_string())
            }
            LibraryError::MalformedManifest { path, reason } => {
                error!("malformed manifest {}: {}", path.display(), reason);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Internal server error: malformed manifest: {reason}"),
                )
            }
            LibraryError::Io(e) => {
                error!("filesystem error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            message,
        )
            .into_response()
    }
}
