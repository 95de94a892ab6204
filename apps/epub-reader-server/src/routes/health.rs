//! Liveness endpoint with a publication-library check

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    /// `healthy`, or `degraded` when the public directory cannot be read
    pub status: &'static str,
    pub version: &'static str,
    pub service: &'static str,
    /// EPUB files currently available, when the directory is readable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publications: Option<usize>,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let publications = match state.library().scan().await {
        Ok(files) => Some(files.len()),
        Err(e) => {
            tracing::warn!(
                dir = %state.library().root().display(),
                error = %e,
                "Public directory unreadable"
            );
            None
        }
    };

    Json(HealthResponse {
        status: if publications.is_some() { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        service: "epub-reader-server",
        publications,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}
