//! Publication streamer routes
//!
//! Addresses publications by an opaque id (URL-safe base64 of the filename)
//! the way Readium streamers do: `/pub/{id}/manifest.json`.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::Utc;
use serde::Serialize;

use crate::error::{AppError, Result};
use crate::manifest::{manifest_url, publication_title, stream_url, WebPubManifest};
use crate::state::AppState;

/// A publication entry in the listing
#[derive(Debug, Serialize)]
pub struct PublicationEntry {
    pub filename: String,
    pub title: String,
    pub size: u64,
    #[serde(rename = "manifestUrl")]
    pub manifest_url: String,
    #[serde(rename = "publicationUrl")]
    pub publication_url: String,
    #[serde(rename = "streamUrl")]
    pub stream_url: String,
}

/// Create the streamer router (mounted at `/pub`)
pub fn router() -> Router<AppState> {
    Router::new().route("/:id/manifest.json", get(get_publication_manifest))
}

/// Create the listing router (mounted at `/publications`)
pub fn listing_router() -> Router<AppState> {
    Router::new().route("/", get(list_publications))
}

/// Encode a filename as a publication id
pub fn publication_id(filename: &str) -> String {
    URL_SAFE_NO_PAD.encode(filename.as_bytes())
}

/// Decode a publication id back to its filename
pub fn decode_publication_id(id: &str) -> Option<String> {
    let bytes = URL_SAFE_NO_PAD.decode(id.as_bytes()).ok()?;
    String::from_utf8(bytes).ok()
}

/// Manifest for a publication addressed by id
async fn get_publication_manifest(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<WebPubManifest>> {
    let filename = decode_publication_id(&id)
        .ok_or_else(|| AppError::NotFound(format!("Unknown publication: {}", id)))?;

    if state.library().resolve(&filename).await.is_none() {
        return Err(AppError::NotFound(format!("Publication not found: {}", filename)));
    }

    Ok(Json(WebPubManifest::for_epub(
        state.base_url(),
        &filename,
        Utc::now(),
    )))
}

/// List every EPUB available in the public directory
async fn list_publications(State(state): State<AppState>) -> Result<Json<Vec<PublicationEntry>>> {
    let base = state.base_url();
    let entries = state
        .library()
        .scan()
        .await?
        .into_iter()
        .map(|file| {
            let id = publication_id(&file.filename);
            PublicationEntry {
                title: publication_title(&file.filename),
                size: file.size,
                manifest_url: manifest_url(base, &file.filename),
                publication_url: format!("{}/pub/{}/manifest.json", base, id),
                stream_url: stream_url(base, &file.filename),
                filename: file.filename,
            }
        })
        .collect();

    Ok(Json(entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn app_with(dir: &TempDir) -> Router {
        let mut config = Config::default();
        config.library.public_dir = dir.path().to_path_buf();
        config.server.public_base_url = "http://localhost:4444".to_string();
        crate::app(AppState::new(config))
    }

    async fn json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_publication_id_round_trips_filename() {
        let id = publication_id("games.epub");
        assert!(!id.contains('='));
        assert_eq!(decode_publication_id(&id).as_deref(), Some("games.epub"));
        assert!(decode_publication_id("***").is_none());
    }

    #[tokio::test]
    async fn test_publication_manifest_by_id() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("games.epub"), b"PK").unwrap();
        let app = app_with(&dir);

        let uri = format!("/pub/{}/manifest.json", publication_id("games.epub"));
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json(response).await;
        assert_eq!(body["metadata"]["title"], "games");
        assert_eq!(body["readingOrder"][0]["href"], "http://localhost:4444/epub/games.epub");
    }

    #[tokio::test]
    async fn test_publication_manifest_unknown_file() {
        let dir = TempDir::new().unwrap();
        let app = app_with(&dir);

        let uri = format!("/pub/{}/manifest.json", publication_id("ghost.epub"));
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_listing() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("games.epub"), b"PK12").unwrap();
        std::fs::write(dir.path().join("cover.png"), b"img").unwrap();
        let app = app_with(&dir);

        let response = app
            .oneshot(Request::builder().uri("/publications").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json(response).await;
        let list = body.as_array().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["filename"], "games.epub");
        assert_eq!(list[0]["size"], 4);
        assert_eq!(list[0]["streamUrl"], "http://localhost:4444/epub/games.epub");
    }
}
