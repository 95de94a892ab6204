//! Reader state store
//!
//! [`ReaderStore`] is a cheaply cloneable handle shared by the viewport and
//! the panels. Every mutation goes through the store, which persists the
//! preference and annotation subset of the state and publishes a fresh
//! [`ReaderState`] snapshot to subscribers.
//!
//! Locks are never held across an await: engine calls happen after the state
//! has been updated and the lock released.

mod annotations;
mod navigation;
mod settings;

use std::convert::Infallible;
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::watch;

use crate::engine::{AttachedEngine, ReadingEngine, UserSettings};
use crate::error::StorageError;
use crate::storage::{load_state, save_state, PersistedState, StateStorage, STATE_KEY};
use crate::types::{Bookmark, EpubMetadata, Highlight, ReaderSettings, TocItem};

pub use navigation::NavigationTarget;

/// Snapshot of everything the reader UI renders from
#[derive(Debug, Clone, PartialEq)]
pub struct ReaderState {
    pub is_loading: bool,
    /// Set when the publication could not be opened
    pub load_error: Option<String>,
    /// Href of the resource being displayed
    pub current_location: Option<String>,
    /// Book-wide progress in [0, 1]
    pub progress: f64,
    pub is_settings_open: bool,
    pub is_toc_open: bool,
    pub settings: ReaderSettings,
    pub metadata: Option<EpubMetadata>,
    pub toc: Vec<TocItem>,
    pub bookmarks: Vec<Bookmark>,
    pub highlights: Vec<Highlight>,
    pub engine_attached: bool,
}

impl Default for ReaderState {
    fn default() -> Self {
        Self::restored(PersistedState::default())
    }
}

impl ReaderState {
    /// Fresh session state carrying persisted preferences and annotations
    fn restored(persisted: PersistedState) -> Self {
        Self {
            is_loading: false,
            load_error: None,
            current_location: None,
            progress: 0.0,
            is_settings_open: false,
            is_toc_open: false,
            settings: persisted.settings,
            metadata: None,
            toc: Vec::new(),
            bookmarks: persisted.bookmarks,
            highlights: persisted.highlights,
            engine_attached: false,
        }
    }

    fn persisted(&self) -> PersistedState {
        PersistedState {
            settings: self.settings.clone(),
            bookmarks: self.bookmarks.clone(),
            highlights: self.highlights.clone(),
        }
    }
}

struct StoreInner {
    state: RwLock<ReaderState>,
    engine: RwLock<Option<AttachedEngine>>,
    storage: Arc<dyn StateStorage>,
    storage_key: String,
    updates: watch::Sender<ReaderState>,
}

/// Shared handle to the reader state
#[derive(Clone)]
pub struct ReaderStore {
    inner: Arc<StoreInner>,
}

impl ReaderStore {
    /// Open the store, restoring persisted state from the default key
    pub fn open(storage: Arc<dyn StateStorage>) -> Self {
        Self::with_key(storage, STATE_KEY)
    }

    pub fn with_key(storage: Arc<dyn StateStorage>, storage_key: impl Into<String>) -> Self {
        let storage_key = storage_key.into();

        let persisted = match load_state(storage.as_ref(), &storage_key) {
            Ok(Some(persisted)) => {
                tracing::info!(
                    key = %storage_key,
                    bookmarks = persisted.bookmarks.len(),
                    highlights = persisted.highlights.len(),
                    "Restored reader state"
                );
                persisted
            }
            Ok(None) => PersistedState::default(),
            Err(e) => {
                tracing::warn!(key = %storage_key, error = %e, "Discarding unreadable reader state");
                PersistedState::default()
            }
        };

        let state = ReaderState::restored(persisted);
        let (updates, _) = watch::channel(state.clone());

        Self {
            inner: Arc::new(StoreInner {
                state: RwLock::new(state),
                engine: RwLock::new(None),
                storage,
                storage_key,
                updates,
            }),
        }
    }

    /// Current state
    pub fn snapshot(&self) -> ReaderState {
        self.inner.state.read().clone()
    }

    /// Receive a snapshot after every mutation
    pub fn subscribe(&self) -> watch::Receiver<ReaderState> {
        self.inner.updates.subscribe()
    }

    /// Attached engine, if any
    pub fn engine(&self) -> Option<AttachedEngine> {
        self.inner.engine.read().clone()
    }

    // ========================================================================
    // Mutation plumbing
    // ========================================================================

    /// Apply `f` and publish the result. An `Err` leaves the state untouched
    /// and notifies nobody; `f` must not mutate before failing.
    fn try_update<T, E>(
        &self,
        persist: bool,
        f: impl FnOnce(&mut ReaderState) -> Result<T, E>,
    ) -> Result<T, E> {
        let mut state = self.inner.state.write();
        let value = f(&mut *state)?;
        if persist {
            self.persist(&state);
        }
        self.inner.updates.send_replace(state.clone());
        Ok(value)
    }

    fn update<T>(&self, persist: bool, f: impl FnOnce(&mut ReaderState) -> T) -> T {
        match self.try_update::<T, Infallible>(persist, |state| Ok(f(state))) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    fn persist(&self, state: &ReaderState) {
        if let Err(e) = save_state(
            self.inner.storage.as_ref(),
            &self.inner.storage_key,
            &state.persisted(),
        ) {
            tracing::error!(key = %self.inner.storage_key, error = %e, "Failed to persist reader state");
        }
    }

    // ========================================================================
    // Transient state
    // ========================================================================

    pub fn set_loading(&self, is_loading: bool) {
        self.update(false, |state| state.is_loading = is_loading);
    }

    pub fn set_load_error(&self, error: Option<String>) {
        self.update(false, |state| state.load_error = error);
    }

    pub fn set_current_location(&self, href: impl Into<String>) {
        let href = href.into();
        self.update(false, |state| state.current_location = Some(href));
    }

    /// Set book-wide progress, clamped into [0, 1]. Non-finite values are ignored.
    pub fn set_progress(&self, progress: f64) {
        if !progress.is_finite() {
            tracing::warn!(progress, "Ignoring non-finite progress");
            return;
        }
        self.update(false, |state| state.progress = progress.clamp(0.0, 1.0));
    }

    pub fn set_settings_open(&self, open: bool) {
        self.update(false, |state| state.is_settings_open = open);
    }

    pub fn set_toc_open(&self, open: bool) {
        self.update(false, |state| state.is_toc_open = open);
    }

    pub fn set_metadata(&self, metadata: EpubMetadata) {
        self.update(false, |state| state.metadata = Some(metadata));
    }

    pub fn set_toc(&self, toc: Vec<TocItem>) {
        self.update(false, |state| state.toc = toc);
    }

    // ========================================================================
    // Engine lifecycle
    // ========================================================================

    /// Attach a loaded engine and push the full current settings to it
    pub async fn attach_engine(&self, handle: Arc<dyn ReadingEngine>) -> AttachedEngine {
        let engine = AttachedEngine::new(handle);
        *self.inner.engine.write() = Some(engine.clone());

        let settings = self.update(false, |state| {
            state.engine_attached = true;
            state.settings.clone()
        });

        tracing::info!(navigation = ?engine.navigation(), "Reading engine attached");

        if let Err(e) = engine
            .handle()
            .apply_user_settings(&UserSettings::full(&settings))
            .await
        {
            tracing::error!(error = %e, "Failed to apply initial reader settings");
        }

        engine
    }

    /// Detach the engine and clear per-publication state.
    ///
    /// Preferences and annotations are kept. Returns the detached engine so
    /// the caller can destroy it.
    pub fn reset_reader(&self) -> Option<AttachedEngine> {
        let engine = self.inner.engine.write().take();
        self.update(false, |state| {
            state.engine_attached = false;
            state.is_loading = false;
            state.load_error = None;
            state.current_location = None;
            state.progress = 0.0;
            state.metadata = None;
            state.toc.clear();
        });
        tracing::debug!(had_engine = engine.is_some(), "Reader reset");
        engine
    }

    /// Forget saved preferences and annotations.
    ///
    /// Deletes the persisted blob, restores default settings and empties the
    /// bookmark and highlight lists. An attached engine receives the default
    /// settings.
    pub async fn clear_saved_data(&self) -> Result<(), StorageError> {
        self.inner.storage.remove(&self.inner.storage_key)?;

        let settings = self.update(false, |state| {
            let defaults = PersistedState::default();
            state.settings = defaults.settings;
            state.bookmarks = defaults.bookmarks;
            state.highlights = defaults.highlights;
            state.settings.clone()
        });
        tracing::info!(key = %self.inner.storage_key, "Cleared saved reader data");

        self.forward_settings(UserSettings::full(&settings)).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use crate::testing::ScriptedEngine;
    use crate::types::Theme;

    fn memory_store() -> (Arc<MemoryStorage>, ReaderStore) {
        let storage = Arc::new(MemoryStorage::new());
        let store = ReaderStore::open(storage.clone());
        (storage, store)
    }

    #[test]
    fn test_initial_state() {
        let (_, store) = memory_store();
        let state = store.snapshot();

        assert!(!state.is_loading);
        assert_eq!(state.progress, 0.0);
        assert_eq!(state.settings, ReaderSettings::default());
        assert!(state.bookmarks.is_empty());
        assert!(store.engine().is_none());
    }

    #[test]
    fn test_progress_is_clamped() {
        let (_, store) = memory_store();

        store.set_progress(1.7);
        assert_eq!(store.snapshot().progress, 1.0);

        store.set_progress(-0.2);
        assert_eq!(store.snapshot().progress, 0.0);

        store.set_progress(0.3);
        store.set_progress(f64::NAN);
        assert_eq!(store.snapshot().progress, 0.3);
    }

    #[tokio::test]
    async fn test_persisted_round_trip_skips_transient_fields() {
        let (storage, store) = memory_store();

        store.set_theme(Theme::Dark).await;
        store.set_font_size(18).await;
        store.set_current_location("ch3.xhtml");
        store.set_progress(0.6);
        store.set_loading(true);
        store.set_toc_open(true);
        let bookmark = store.create_bookmark().unwrap();

        let reloaded = ReaderStore::open(storage).snapshot();

        assert_eq!(reloaded.settings.font_size, 18);
        assert_eq!(reloaded.settings.theme, Theme::Dark);
        assert_eq!(reloaded.bookmarks, vec![bookmark]);
        assert!(!reloaded.is_loading);
        assert!(!reloaded.is_toc_open);
        assert_eq!(reloaded.current_location, None);
        assert_eq!(reloaded.progress, 0.0);
        assert!(!reloaded.engine_attached);
    }

    #[test]
    fn test_corrupt_storage_falls_back_to_defaults() {
        let storage = Arc::new(MemoryStorage::new());
        storage.save(STATE_KEY, "not json").unwrap();

        let store = ReaderStore::open(storage);
        assert_eq!(store.snapshot().settings, ReaderSettings::default());
    }

    #[test]
    fn test_transient_updates_do_not_write_storage() {
        let (storage, store) = memory_store();

        store.set_loading(true);
        store.set_progress(0.4);
        store.set_toc_open(true);

        assert!(storage.is_empty());
    }

    #[test]
    fn test_subscribers_see_every_update() {
        let (_, store) = memory_store();
        let mut updates = store.subscribe();

        store.set_settings_open(true);
        assert!(updates.has_changed().unwrap());
        assert!(updates.borrow_and_update().is_settings_open);

        store.set_current_location("ch1.xhtml");
        assert_eq!(
            updates.borrow_and_update().current_location.as_deref(),
            Some("ch1.xhtml")
        );
    }

    #[tokio::test]
    async fn test_attach_applies_full_settings() {
        let (_, store) = memory_store();
        store.set_theme(Theme::Sepia).await;

        let engine = Arc::new(ScriptedEngine::full());
        store.attach_engine(engine.clone()).await;

        let applied = engine.applied();
        assert_eq!(applied.len(), 1);
        assert_eq!(applied[0], UserSettings::full(&store.snapshot().settings));
        assert_eq!(applied[0].appearance.as_deref(), Some("sepia"));
        assert!(store.snapshot().engine_attached);
    }

    #[tokio::test]
    async fn test_restored_settings_reach_engine_in_range() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .save(
                STATE_KEY,
                r#"{"state": {"fontSize": 999, "lineHeight": 9.5, "marginSize": 40}, "version": 0}"#,
            )
            .unwrap();
        let store = ReaderStore::open(storage);

        let engine = Arc::new(ScriptedEngine::full());
        store.attach_engine(engine.clone()).await;

        let settings = store.snapshot().settings;
        assert_eq!(settings.font_size, 24);
        assert_eq!(settings.line_height, 2.0);
        assert_eq!(settings.margin_size, 4);
        assert_eq!(engine.applied()[0], UserSettings::full(&settings));
    }

    #[tokio::test]
    async fn test_clear_saved_data() {
        let (storage, store) = memory_store();
        let engine = Arc::new(ScriptedEngine::full());
        store.attach_engine(engine.clone()).await;
        store.set_theme(Theme::Dark).await;
        store.set_current_location("ch2.xhtml");
        store.create_bookmark().unwrap();
        assert_eq!(storage.len(), 1);

        store.clear_saved_data().await.unwrap();

        let state = store.snapshot();
        assert!(storage.is_empty());
        assert_eq!(state.settings, ReaderSettings::default());
        assert!(state.bookmarks.is_empty());
        assert_eq!(state.current_location.as_deref(), Some("ch2.xhtml"));
        assert_eq!(
            engine.applied().last(),
            Some(&UserSettings::full(&ReaderSettings::default()))
        );
        assert!(ReaderStore::open(storage).snapshot().bookmarks.is_empty());
    }

    #[tokio::test]
    async fn test_reset_keeps_annotations() {
        let (_, store) = memory_store();
        store.attach_engine(Arc::new(ScriptedEngine::full())).await;
        store.set_current_location("ch1.xhtml");
        store.set_progress(0.5);
        store.set_toc(vec![TocItem {
            id: "ch1.xhtml".to_string(),
            href: "ch1.xhtml".to_string(),
            title: "One".to_string(),
            level: 0,
            children: Vec::new(),
        }]);
        store.create_bookmark().unwrap();

        let detached = store.reset_reader();
        let state = store.snapshot();

        assert!(detached.is_some());
        assert!(store.engine().is_none());
        assert_eq!(state.current_location, None);
        assert_eq!(state.progress, 0.0);
        assert!(state.toc.is_empty());
        assert!(state.metadata.is_none());
        assert_eq!(state.bookmarks.len(), 1);
    }
}
