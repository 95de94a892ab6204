//! EPUB Reader core
//!
//! Reader state, the bridge to the external reading engine, progress
//! reconciliation, persistence and the panel view models.

pub mod config;
pub mod engine;
pub mod error;
pub mod panels;
pub mod progress;
pub mod storage;
pub mod store;
pub mod toc;
pub mod types;
pub mod viewport;

#[cfg(test)]
pub(crate) mod testing;

pub use config::ViewerConfig;
pub use engine::{AttachedEngine, EngineEvent, EngineLoader, ReadingEngine};
pub use error::{EngineError, ProgressError, StorageError, StoreError, ViewportError};
pub use storage::{FileStorage, MemoryStorage, StateStorage};
pub use store::{NavigationTarget, ReaderState, ReaderStore};
pub use viewport::ReaderViewport;
