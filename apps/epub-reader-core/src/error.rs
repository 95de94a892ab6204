//! Error types for the reader core

use thiserror::Error;

/// Errors reported by the external reading engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Engine does not support {0}")]
    Unsupported(&'static str),

    #[error("Engine failed to load: {0}")]
    Load(String),

    #[error("Engine call failed: {0}")]
    Call(String),
}

/// Errors from the progress reconciliation chain
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProgressError {
    #[error("Locator field {field} is not a finite number ({value})")]
    NonFinite { field: &'static str, value: f64 },
}

/// Local persistence errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Store mutation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Bookmark already exists: {0}")]
    DuplicateBookmark(String),

    #[error("Highlight already exists: {0}")]
    DuplicateHighlight(String),
}

/// Viewport boot errors
#[derive(Error, Debug)]
pub enum ViewportError {
    #[error("Invalid publication URL: {0}")]
    InvalidUrl(String),

    #[error("Cannot access EPUB URL: {0}")]
    Unreachable(String),

    #[error("Failed to initialize reader: {0}")]
    Engine(#[from] EngineError),
}
