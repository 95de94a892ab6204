use crate::store::{ReaderState, ReaderStore};

use super::format_progress;

/// Title shown before the publication metadata arrives
pub const DEFAULT_TITLE: &str = "EPUB Reader";

#[derive(Debug, Clone, PartialEq)]
pub struct ToolbarView {
    pub title: String,
    pub progress_label: String,
    pub toc_open: bool,
    pub settings_open: bool,
}

impl ToolbarView {
    pub fn from_state(state: &ReaderState) -> Self {
        Self {
            title: state
                .metadata
                .as_ref()
                .map(|m| m.title.clone())
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            progress_label: format_progress(state.progress),
            toc_open: state.is_toc_open,
            settings_open: state.is_settings_open,
        }
    }
}

pub struct Toolbar {
    store: ReaderStore,
}

impl Toolbar {
    pub fn new(store: ReaderStore) -> Self {
        Self { store }
    }

    pub fn view(&self) -> ToolbarView {
        ToolbarView::from_state(&self.store.snapshot())
    }

    pub fn toggle_toc(&self) {
        let open = self.store.snapshot().is_toc_open;
        self.store.set_toc_open(!open);
    }

    pub fn toggle_settings(&self) {
        let open = self.store.snapshot().is_settings_open;
        self.store.set_settings_open(!open);
    }

    pub async fn next_page(&self) -> bool {
        self.store.next_page().await
    }

    pub async fn previous_page(&self) -> bool {
        self.store.previous_page().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::engine::EngineMetadata;
    use crate::storage::MemoryStorage;
    use crate::testing::{Navigation, ScriptedEngine};
    use crate::types::EpubMetadata;

    #[tokio::test]
    async fn test_view_and_actions() {
        let store = ReaderStore::open(Arc::new(MemoryStorage::new()));
        let engine = Arc::new(ScriptedEngine::full());
        store.attach_engine(engine.clone()).await;
        let toolbar = Toolbar::new(store.clone());

        assert_eq!(toolbar.view().title, DEFAULT_TITLE);
        assert_eq!(toolbar.view().progress_label, "0%");

        store.set_metadata(EpubMetadata::from(EngineMetadata {
            title: Some("Walden".to_string()),
            ..Default::default()
        }));
        store.set_progress(0.426);
        toolbar.toggle_toc();
        toolbar.toggle_settings();
        toolbar.toggle_settings();

        let view = toolbar.view();
        assert_eq!(view.title, "Walden");
        assert_eq!(view.progress_label, "43%");
        assert!(view.toc_open);
        assert!(!view.settings_open);

        assert!(toolbar.next_page().await);
        assert!(toolbar.previous_page().await);
        assert_eq!(engine.navigations(), vec![Navigation::Next, Navigation::Previous]);
    }
}
