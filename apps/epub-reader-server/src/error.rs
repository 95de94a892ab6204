//! Error types for the EPUB Reader server

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// Missing EPUB on the streaming route, rendered as `{"error": "EPUB file not found"}`
    #[error("EPUB file not found")]
    EpubNotFound,

    #[error("Range not satisfiable for a file of {size} bytes")]
    RangeNotSatisfiable { size: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] axum::http::Error),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            AppError::EpubNotFound => {
                let body = Json(serde_json::json!({ "error": self.to_string() }));
                return (StatusCode::NOT_FOUND, body).into_response();
            }
            AppError::RangeNotSatisfiable { size } => {
                tracing::debug!("Unsatisfiable range request for {} byte file", size);
                let body = Json(ErrorResponse {
                    error: "range_not_satisfiable".to_string(),
                    message: self.to_string(),
                    details: None,
                });
                return (
                    StatusCode::RANGE_NOT_SATISFIABLE,
                    [(header::CONTENT_RANGE, format!("bytes */{}", size))],
                    body,
                )
                    .into_response();
            }
            AppError::Io(e) => {
                tracing::error!("IO error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "io_error",
                    "IO error".to_string(),
                )
            }
            AppError::Http(e) => {
                tracing::error!("Failed to build response: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
            details: if cfg!(debug_assertions) {
                Some(self.to_string())
            } else {
                None
            },
        });

        (status, body).into_response()
    }
}
