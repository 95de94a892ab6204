//! Highlight and note dialogs

use crate::engine::{Locations, Locator};
use crate::store::ReaderStore;
use crate::types::{Highlight, HighlightColor, NewHighlight};

use super::format_date;

// ============================================================================
// Notes list
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct NoteEntry {
    pub id: String,
    pub color_name: &'static str,
    pub color_hex: &'static str,
    pub text: String,
    pub note: Option<String>,
    pub date: String,
}

impl From<&Highlight> for NoteEntry {
    fn from(highlight: &Highlight) -> Self {
        Self {
            id: highlight.id.clone(),
            color_name: highlight.color.name(),
            color_hex: highlight.color.hex(),
            text: highlight.text.clone(),
            note: highlight.note.clone(),
            date: format_date(highlight.timestamp),
        }
    }
}

/// Lists every highlight with its note
pub struct NotesDialog {
    store: ReaderStore,
    open: bool,
}

impl NotesDialog {
    pub fn new(store: ReaderStore) -> Self {
        Self { store, open: false }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn entries(&self) -> Vec<NoteEntry> {
        self.store.snapshot().highlights.iter().map(NoteEntry::from).collect()
    }

    /// Navigate to a highlight and close the dialog
    pub async fn go_to(&mut self, id: &str) -> bool {
        let Some(highlight) = self
            .store
            .snapshot()
            .highlights
            .into_iter()
            .find(|h| h.id == id)
        else {
            return false;
        };

        let locator = Locator {
            href: highlight.href,
            locations: Locations {
                cfi: Some(highlight.cfi),
                ..Default::default()
            },
            ..Default::default()
        };
        let navigated = self.store.go_to_location(locator).await;
        self.close();
        navigated
    }

    pub fn delete(&self, id: &str) -> bool {
        self.store.remove_highlight(id)
    }
}

// ============================================================================
// Highlight creation
// ============================================================================

/// A text selection reported by the engine
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub text: String,
    pub cfi: String,
    pub href: String,
}

/// Color and note input for a new highlight
pub struct NoteCreationDialog {
    store: ReaderStore,
    selection: Option<Selection>,
    color: HighlightColor,
    note: String,
}

impl NoteCreationDialog {
    pub fn new(store: ReaderStore) -> Self {
        Self {
            store,
            selection: None,
            color: HighlightColor::default(),
            note: String::new(),
        }
    }

    /// Open for a selection with the input reset
    pub fn open(&mut self, selection: Selection) {
        self.selection = Some(selection);
        self.color = HighlightColor::default();
        self.note.clear();
    }

    pub fn is_open(&self) -> bool {
        self.selection.is_some()
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn color(&self) -> HighlightColor {
        self.color
    }

    pub fn set_color(&mut self, color: HighlightColor) {
        self.color = color;
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn set_note(&mut self, note: impl Into<String>) {
        self.note = note.into();
    }

    /// Store the highlight and close; `None` when the dialog is not open
    pub fn save(&mut self) -> Option<Highlight> {
        let selection = self.selection.take()?;
        let highlight = self.store.create_highlight(NewHighlight {
            cfi: selection.cfi,
            href: selection.href,
            text: selection.text,
            color: self.color,
            note: Some(std::mem::take(&mut self.note)),
        });
        Some(highlight)
    }

    pub fn cancel(&mut self) {
        self.selection = None;
    }
}
