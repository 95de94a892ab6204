//! Reader configuration

use std::env;
use std::path::PathBuf;

use crate::engine::Injectable;
use crate::storage::{FileStorage, STATE_KEY};

const DEFAULT_BASE_ORIGIN: &str = "http://localhost:3000";
const DEFAULT_PUBLICATION_URL: &str = "http://localhost:3003/epub/games.epub";
const DEFAULT_READIUM_CSS_BASE: &str = "/readium-css";

#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Origin that relative publication URLs are resolved against
    pub base_origin: String,
    /// Publication opened when none is requested
    pub default_url: String,
    /// Stylesheets injected into every publication resource
    pub injectables: Vec<Injectable>,
    /// HEAD-probe the publication URL before handing it to the engine
    pub probe_url: bool,
    pub vertical_scroll: bool,
    pub enable_gpu_hardware_acceleration: bool,
    /// Directory for the file storage backend
    pub storage_dir: PathBuf,
    /// Blob name of the persisted store state
    pub storage_key: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            base_origin: DEFAULT_BASE_ORIGIN.to_string(),
            default_url: DEFAULT_PUBLICATION_URL.to_string(),
            injectables: Injectable::readium_css(DEFAULT_READIUM_CSS_BASE),
            probe_url: true,
            vertical_scroll: true,
            enable_gpu_hardware_acceleration: true,
            storage_dir: PathBuf::from("./.epub-reader"),
            storage_key: STATE_KEY.to_string(),
        }
    }
}

impl ViewerConfig {
    /// Load from `.env` and the environment, keeping defaults for unset keys
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        let readium_css = env::var("READER_READIUM_CSS_BASE")
            .unwrap_or_else(|_| DEFAULT_READIUM_CSS_BASE.to_string());

        Self {
            base_origin: env::var("READER_BASE_ORIGIN").unwrap_or(defaults.base_origin),
            default_url: env::var("READER_DEFAULT_URL").unwrap_or(defaults.default_url),
            injectables: Injectable::readium_css(&readium_css),
            probe_url: env_flag("READER_PROBE_URL").unwrap_or(defaults.probe_url),
            vertical_scroll: env_flag("READER_VERTICAL_SCROLL").unwrap_or(defaults.vertical_scroll),
            enable_gpu_hardware_acceleration: env_flag("READER_GPU_ACCELERATION")
                .unwrap_or(defaults.enable_gpu_hardware_acceleration),
            storage_dir: env::var("READER_STORAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_dir),
            storage_key: env::var("READER_STORAGE_KEY").unwrap_or(defaults.storage_key),
        }
    }

    /// File-backed storage in the configured directory
    pub fn file_storage(&self) -> FileStorage {
        FileStorage::new(&self.storage_dir)
    }
}

fn env_flag(name: &str) -> Option<bool> {
    parse_flag(&env::var(name).ok()?)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::default();
        assert_eq!(config.base_origin, "http://localhost:3000");
        assert_eq!(config.storage_key, "storage");
        assert_eq!(config.injectables.len(), 3);
        assert!(config.injectables[0].url.ends_with("ReadiumCSS-before.css"));
    }

    #[test]
    fn test_store_from_config() {
        use std::sync::Arc;

        use crate::store::ReaderStore;

        let dir = tempfile::TempDir::new().unwrap();
        let config = ViewerConfig {
            storage_dir: dir.path().to_path_buf(),
            storage_key: "library".to_string(),
            ..Default::default()
        };

        let store = ReaderStore::with_key(Arc::new(config.file_storage()), &config.storage_key);
        store.set_current_location("ch1.xhtml");
        store.create_bookmark().unwrap();

        assert!(dir.path().join("epub-reader-library.json").exists());
        let reopened = ReaderStore::with_key(Arc::new(config.file_storage()), &config.storage_key);
        assert_eq!(reopened.snapshot().bookmarks.len(), 1);
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" off "), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
