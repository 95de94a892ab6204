//! Manifest routes
//!
//! Synthesizes a Readium Web Publication Manifest for each served EPUB.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use chrono::Utc;

use crate::error::Result;
use crate::manifest::WebPubManifest;
use crate::state::AppState;

/// Create the manifest router
pub fn router() -> Router<AppState> {
    Router::new().route("/:filename", get(get_manifest))
}

/// Manifest for `filename`; the reading order points at `/epub/:filename`
async fn get_manifest(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Json<WebPubManifest>> {
    tracing::debug!("Generating manifest for {}", filename);
    Ok(Json(WebPubManifest::for_epub(
        state.base_url(),
        &filename,
        Utc::now(),
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::{body::Body, http::{Request, StatusCode}};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_manifest_points_at_stream() {
        let mut config = Config::default();
        config.server.public_base_url = "http://books.local".to_string();
        let app = crate::app(AppState::new(config));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/manifest/games.epub")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let manifest: WebPubManifest = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(manifest.metadata.title, "games");
        assert!(manifest.metadata.identifier.starts_with("epub-"));
        assert_eq!(manifest.links[0].href, "http://books.local/manifest/games.epub");
        assert_eq!(manifest.reading_order.len(), 1);
        assert_eq!(manifest.reading_order[0].href, "http://books.local/epub/games.epub");
    }
}
