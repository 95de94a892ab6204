//! Reader panels
//!
//! Render-agnostic view models for the toolbar, the table-of-contents and
//! settings drawers and the notes dialogs. Each panel reads from and acts on a
//! shared [`ReaderStore`](crate::store::ReaderStore).

mod notes;
mod settings_drawer;
mod toc_drawer;
mod toolbar;

use chrono::{DateTime, Utc};

pub use notes::{NoteCreationDialog, NoteEntry, NotesDialog, Selection};
pub use settings_drawer::{SettingsDrawer, SliderRange};
pub use toc_drawer::{BookmarkRow, TocDrawer, TocRow, TocTab};
pub use toolbar::{Toolbar, ToolbarView, DEFAULT_TITLE};

/// Whole-percent progress label, e.g. `42%`
pub fn format_progress(progress: f64) -> String {
    format!("{}%", (progress * 100.0).round() as i64)
}

/// Cut `text` to `max_chars` characters, marking the cut with `...`
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}...", cut.trim())
}

/// Display form of a timestamp, e.g. `Mar 7, 2024, 03:05 PM`
pub fn format_date(at: DateTime<Utc>) -> String {
    at.format("%b %-d, %Y, %I:%M %p").to_string()
}
