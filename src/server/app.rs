// axum application setup and server startup

use anyhow::{Context, Result};
use axum::{middleware, routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use super::{
    handlers::{assets::serve_static_asset, browse::handle_browse},
    middleware::security::add_security_headers,
};
use crate::config::{validate_configuration, AppConfig};
use crate::library::{load_manifest, MANIFEST_FILE};

/// shared application state; the configuration is immutable once the server starts
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

/// create the axum application, validating the configuration first
pub fn create_app(config: AppConfig) -> Result<Router> {
    validate_configuration(&config)?;
    Ok(build_router(config))
}

/// create app for testing (skips validation)
pub fn create_test_app(config: AppConfig) -> Router {
    build_router(config)
}

fn build_router(config: AppConfig) -> Router {
    let app_state = AppState::new(config);

    Router::new()
        // static asset routes
        .route("/__mserve_static/*path", get(serve_static_asset))
        // every other path is a library path
        .route("/", get(handle_browse))
        .route("/*path", get(handle_browse))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(add_security_headers)),
        )
        .with_state(app_state)
}

/// start the http server
pub async fn start_server(config: AppConfig) -> Result<()> {
    let app = create_app(config.clone())?;

    let addr: SocketAddr = config
        .listen_authority()
        .parse()
        .context("invalid host/port combination")?;

    info!("starting mserve v{} at http://{}", env!("CARGO_PKG_VERSION"), addr);
    info!("media dir: {}", config.media_dir().display());

    // an unmanifested root hides the whole library
    match load_manifest(config.media_dir()).await {
        Ok(Some(_)) => {}
        Ok(None) => warn!(
            "media dir has no {}; every request will be answered with 404",
            MANIFEST_FILE
        ),
        Err(e) => warn!("media dir manifest is unusable: {}", e),
    }

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("failed to bind to address")?;

    info!("server listening on {}", addr);

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
