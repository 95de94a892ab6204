//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::library::PublicLibrary;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    library: PublicLibrary,
}

impl AppState {
    /// Create a new application state rooted at the configured public directory
    pub fn new(config: Config) -> Self {
        let library = PublicLibrary::new(config.library.public_dir.clone());
        Self {
            inner: Arc::new(AppStateInner { config, library }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the publication library
    pub fn library(&self) -> &PublicLibrary {
        &self.inner.library
    }

    /// Base URL used when writing absolute links into manifests
    pub fn base_url(&self) -> &str {
        &self.inner.config.server.public_base_url
    }
}
