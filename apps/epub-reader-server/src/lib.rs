//! EPUB Reader Server
//!
//! Streams EPUB files with byte-range support and synthesizes minimal
//! Readium Web Publication Manifests for them.
//!
//! # Routes
//!
//! - `GET /epub/:filename`: byte-range capable EPUB stream
//! - `GET /manifest/:filename`: Web Publication Manifest
//! - `GET /pub/:id/manifest.json`: manifest addressed by publication id
//! - `GET /publications`: available EPUBs
//! - `GET /public/*`: static files
//! - `GET /health`

use axum::{
    http::{header, Method},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod library;
pub mod manifest;
pub mod range;
pub mod routes;
pub mod state;

use state::AppState;

/// CORS policy permitting cross-origin range reads
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
        .allow_headers([
            header::RANGE,
            header::CONTENT_RANGE,
            header::CONTENT_LENGTH,
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
        ])
        .expose_headers([
            header::CONTENT_RANGE,
            header::CONTENT_LENGTH,
            header::ACCEPT_RANGES,
        ])
}

/// Build the application router
pub fn app(state: AppState) -> Router {
    let static_files = ServeDir::new(state.library().root());

    Router::new()
        .nest("/health", routes::health::router())
        .nest("/epub", routes::epub::router())
        .nest("/manifest", routes::manifest::router())
        .nest("/pub", routes::publications::router())
        .nest("/publications", routes::publications::listing_router())
        .nest_service("/public", static_files)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}
