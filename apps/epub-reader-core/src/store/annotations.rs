//! Bookmarks and highlights

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::StoreError;
use crate::types::{normalize_note, Bookmark, Highlight, HighlightUpdate, NewHighlight};

use super::ReaderStore;

/// Title given to bookmarks the engine did not name
fn default_bookmark_title(at: DateTime<Utc>) -> String {
    format!("Bookmark {}", at.format("%-m/%-d/%Y"))
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

impl ReaderStore {
    // ========================================================================
    // Bookmarks
    // ========================================================================

    /// Bookmark the current reading position.
    ///
    /// Uses the engine's current locator when the engine exposes one, and
    /// falls back to a bookmark carrying only the current href otherwise.
    /// Returns `None` only when there is no current location.
    pub fn create_bookmark(&self) -> Option<Bookmark> {
        let Some(current_location) = self.inner.state.read().current_location.clone() else {
            tracing::warn!("Cannot create bookmark without a current location");
            return None;
        };

        let now = Utc::now();
        let degraded = || Bookmark {
            id: new_id(),
            cfi: String::new(),
            href: current_location.clone(),
            title: default_bookmark_title(now),
            excerpt: String::new(),
            timestamp: now,
        };

        let bookmark = match self.engine().filter(|e| e.capabilities().locator_accessor) {
            Some(engine) => match engine.handle().get_current_locator() {
                Ok(locator) => Bookmark {
                    id: new_id(),
                    cfi: locator.locations.cfi.unwrap_or_default(),
                    href: Some(locator.href)
                        .filter(|href| !href.is_empty())
                        .unwrap_or_else(|| current_location.clone()),
                    title: locator
                        .title
                        .filter(|title| !title.is_empty())
                        .unwrap_or_else(|| default_bookmark_title(now)),
                    excerpt: locator.text.unwrap_or_default(),
                    timestamp: now,
                },
                Err(e) => {
                    tracing::warn!(error = %e, "Current locator unavailable, creating fallback bookmark");
                    degraded()
                }
            },
            None => {
                tracing::debug!("No current locator accessor, creating fallback bookmark");
                degraded()
            }
        };

        self.update(true, |state| state.bookmarks.push(bookmark.clone()));
        tracing::info!(id = %bookmark.id, href = %bookmark.href, "Bookmark created");
        Some(bookmark)
    }

    /// Append a bookmark; ids must be unique
    pub fn add_bookmark(&self, bookmark: Bookmark) -> Result<(), StoreError> {
        self.try_update(true, |state| {
            if state.bookmarks.iter().any(|b| b.id == bookmark.id) {
                return Err(StoreError::DuplicateBookmark(bookmark.id));
            }
            state.bookmarks.push(bookmark);
            Ok(())
        })
    }

    /// Returns whether a bookmark was removed
    pub fn remove_bookmark(&self, id: &str) -> bool {
        self.try_update(true, |state| {
            let index = state.bookmarks.iter().position(|b| b.id == id).ok_or(())?;
            state.bookmarks.remove(index);
            Ok::<_, ()>(())
        })
        .is_ok()
    }

    // ========================================================================
    // Highlights
    // ========================================================================

    /// Create and store a highlight from dialog input
    pub fn create_highlight(&self, input: NewHighlight) -> Highlight {
        let highlight = Highlight {
            id: new_id(),
            cfi: input.cfi,
            href: input.href,
            text: input.text,
            color: input.color,
            note: normalize_note(input.note),
            timestamp: Utc::now(),
        };

        self.update(true, |state| state.highlights.push(highlight.clone()));
        tracing::info!(id = %highlight.id, href = %highlight.href, "Highlight created");
        highlight
    }

    /// Append a highlight; ids must be unique
    pub fn add_highlight(&self, highlight: Highlight) -> Result<(), StoreError> {
        self.try_update(true, |state| {
            if state.highlights.iter().any(|h| h.id == highlight.id) {
                return Err(StoreError::DuplicateHighlight(highlight.id));
            }
            state.highlights.push(highlight);
            Ok(())
        })
    }

    /// Returns whether a highlight was removed
    pub fn remove_highlight(&self, id: &str) -> bool {
        self.try_update(true, |state| {
            let index = state.highlights.iter().position(|h| h.id == id).ok_or(())?;
            state.highlights.remove(index);
            Ok::<_, ()>(())
        })
        .is_ok()
    }

    /// Change a highlight's color or note; returns the updated highlight
    pub fn update_highlight(&self, id: &str, update: HighlightUpdate) -> Option<Highlight> {
        self.try_update(true, |state| {
            let highlight = state
                .highlights
                .iter_mut()
                .find(|h| h.id == id)
                .ok_or(())?;
            if let Some(color) = update.color {
                highlight.color = color;
            }
            if let Some(note) = update.note {
                highlight.note = normalize_note(note);
            }
            Ok::<_, ()>(highlight.clone())
        })
        .ok()
    }
}
