//! Local persistence for reader preferences and annotations
//!
//! The persisted subset of the store lives in one named blob:
//!
//! ```json
//! {"state": {"fontSize": 16, "theme": "light", "bookmarks": [], ...}, "version": 0}
//! ```
//!
//! Backends only move strings around; (de)serialization happens here.

mod backend;

use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::types::{Bookmark, Highlight, ReaderSettings};

pub use backend::{FileStorage, MemoryStorage, StateStorage, STORAGE_PREFIX};

/// Name of the blob holding the persisted store state
pub const STATE_KEY: &str = "storage";

/// Envelope format version
pub const STATE_VERSION: u32 = 0;

/// Store fields that survive a reload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedState {
    #[serde(flatten)]
    pub settings: ReaderSettings,
    pub bookmarks: Vec<Bookmark>,
    pub highlights: Vec<Highlight>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    state: PersistedState,
    #[serde(default)]
    version: u32,
}

/// Read the persisted state stored under `key`
pub fn load_state(
    storage: &dyn StateStorage,
    key: &str,
) -> Result<Option<PersistedState>, StorageError> {
    let Some(raw) = storage.load(key)? else {
        return Ok(None);
    };

    let envelope: Envelope = serde_json::from_str(&raw)?;
    if envelope.version != STATE_VERSION {
        tracing::warn!(
            found = envelope.version,
            expected = STATE_VERSION,
            "Persisted reader state has an unexpected version"
        );
    }
    let mut state = envelope.state;
    state.settings = state.settings.clamped();
    Ok(Some(state))
}

/// Write the persisted state under `key`
pub fn save_state(
    storage: &dyn StateStorage,
    key: &str,
    state: &PersistedState,
) -> Result<(), StorageError> {
    let envelope = Envelope {
        state: state.clone(),
        version: STATE_VERSION,
    };
    let raw = serde_json::to_string(&envelope)?;
    storage.save(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{HighlightColor, Theme};
    use chrono::Utc;

    fn bookmark(id: &str) -> Bookmark {
        Bookmark {
            id: id.to_string(),
            cfi: "epubcfi(/6/4!/4/2)".to_string(),
            href: "ch1.xhtml".to_string(),
            title: "Bookmark".to_string(),
            excerpt: "It was a dark".to_string(),
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_round_trip_through_storage() {
        let storage = MemoryStorage::new();
        let state = PersistedState {
            settings: ReaderSettings {
                font_size: 18,
                theme: Theme::Dark,
                ..Default::default()
            },
            bookmarks: vec![bookmark("b1"), bookmark("b2")],
            highlights: vec![Highlight {
                id: "h1".to_string(),
                cfi: "epubcfi(/6/2)".to_string(),
                href: "ch2.xhtml".to_string(),
                text: "quoted".to_string(),
                color: HighlightColor::Pink,
                note: None,
                timestamp: Utc::now(),
            }],
        };

        save_state(&storage, STATE_KEY, &state).unwrap();
        let loaded = load_state(&storage, STATE_KEY).unwrap().unwrap();

        assert_eq!(loaded, state);
    }

    #[test]
    fn test_blob_layout() {
        let storage = MemoryStorage::new();
        save_state(&storage, STATE_KEY, &PersistedState::default()).unwrap();

        let raw = storage.load(STATE_KEY).unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

        assert_eq!(json["version"], 0);
        assert_eq!(json["state"]["fontSize"], 16);
        assert_eq!(json["state"]["fontFamily"], "Georgia");
        assert!(json["state"]["bookmarks"].is_array());
        assert!(json["state"].get("progress").is_none());
    }

    #[test]
    fn test_partial_blob_fills_defaults() {
        let storage = MemoryStorage::new();
        storage
            .save(STATE_KEY, r#"{"state": {"fontSize": 20}, "version": 0}"#)
            .unwrap();

        let loaded = load_state(&storage, STATE_KEY).unwrap().unwrap();
        assert_eq!(loaded.settings.font_size, 20);
        assert_eq!(loaded.settings.theme, Theme::Light);
        assert!(loaded.bookmarks.is_empty());
    }

    #[test]
    fn test_out_of_range_settings_are_clamped() {
        let storage = MemoryStorage::new();
        storage
            .save(
                STATE_KEY,
                r#"{"state": {"fontSize": 999, "lineHeight": 9.5, "marginSize": 40}, "version": 0}"#,
            )
            .unwrap();

        let settings = load_state(&storage, STATE_KEY).unwrap().unwrap().settings;
        assert_eq!(settings.font_size, 24);
        assert_eq!(settings.line_height, 2.0);
        assert_eq!(settings.margin_size, 4);

        storage
            .save(STATE_KEY, r#"{"state": {"fontSize": 3, "lineHeight": 0.2}}"#)
            .unwrap();
        let settings = load_state(&storage, STATE_KEY).unwrap().unwrap().settings;
        assert_eq!(settings.font_size, 12);
        assert_eq!(settings.line_height, 1.0);
    }

    #[test]
    fn test_missing_and_corrupt_blobs() {
        let storage = MemoryStorage::new();
        assert!(load_state(&storage, STATE_KEY).unwrap().is_none());

        storage.save(STATE_KEY, "{not json").unwrap();
        assert!(matches!(
            load_state(&storage, STATE_KEY),
            Err(StorageError::Serialization(_))
        ));
    }
}
