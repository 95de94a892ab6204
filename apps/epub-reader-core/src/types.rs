//! Reader data model
//!
//! Settings, bookmarks, highlights, table of contents and book metadata as the
//! store holds and persists them.

use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::EngineMetadata;

pub const FONT_SIZE_RANGE: RangeInclusive<u32> = 12..=24;
pub const LINE_HEIGHT_RANGE: RangeInclusive<f64> = 1.0..=2.0;
pub const LINE_HEIGHT_STEP: f64 = 0.1;
pub const MARGIN_SIZE_RANGE: RangeInclusive<u32> = 0..=4;

// ============================================================================
// Settings
// ============================================================================

/// User reading preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReaderSettings {
    pub font_size: u32,
    pub font_family: FontFamily,
    pub theme: Theme,
    pub line_height: f64,
    pub margin_size: u32,
}

impl Default for ReaderSettings {
    fn default() -> Self {
        Self {
            font_size: 16,
            font_family: FontFamily::Georgia,
            theme: Theme::Light,
            line_height: 1.4,
            margin_size: 2,
        }
    }
}

impl ReaderSettings {
    /// Clamp a font size into the supported range
    pub fn clamp_font_size(size: u32) -> u32 {
        size.clamp(*FONT_SIZE_RANGE.start(), *FONT_SIZE_RANGE.end())
    }

    /// Clamp a line height into range, snapped to one decimal.
    ///
    /// Returns `None` for non-finite input.
    pub fn clamp_line_height(height: f64) -> Option<f64> {
        if !height.is_finite() {
            return None;
        }
        let snapped = (height * 10.0).round() / 10.0;
        Some(snapped.clamp(*LINE_HEIGHT_RANGE.start(), *LINE_HEIGHT_RANGE.end()))
    }

    /// Clamp a margin size into the supported range
    pub fn clamp_margin_size(size: u32) -> u32 {
        size.clamp(*MARGIN_SIZE_RANGE.start(), *MARGIN_SIZE_RANGE.end())
    }

    /// Bring every numeric field into range. A non-finite line height falls
    /// back to the default.
    pub fn clamped(self) -> Self {
        let line_height = Self::clamp_line_height(self.line_height)
            .unwrap_or_else(|| Self::default().line_height);
        Self {
            font_size: Self::clamp_font_size(self.font_size),
            line_height,
            margin_size: Self::clamp_margin_size(self.margin_size),
            ..self
        }
    }
}

/// Font families offered to the reader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FontFamily {
    #[default]
    Georgia,
    #[serde(rename = "Times New Roman")]
    TimesNewRoman,
    Arial,
    Helvetica,
    Verdana,
    #[serde(rename = "Open Dyslexic")]
    OpenDyslexic,
}

impl FontFamily {
    pub const ALL: [Self; 6] = [
        Self::Georgia,
        Self::TimesNewRoman,
        Self::Arial,
        Self::Helvetica,
        Self::Verdana,
        Self::OpenDyslexic,
    ];

    /// Display label
    pub const fn label(self) -> &'static str {
        match self {
            Self::Georgia => "Georgia",
            Self::TimesNewRoman => "Times New Roman",
            Self::Arial => "Arial",
            Self::Helvetica => "Helvetica",
            Self::Verdana => "Verdana",
            Self::OpenDyslexic => "Open Dyslexic",
        }
    }

    /// Family name understood by the reading engine
    pub const fn engine_family(self) -> &'static str {
        match self {
            Self::Georgia | Self::TimesNewRoman => "serif",
            Self::Arial | Self::Helvetica | Self::Verdana => "sans-serif",
            Self::OpenDyslexic => "opendyslexic",
        }
    }
}

/// Color themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
    Sepia,
}

impl Theme {
    pub const ALL: [Self; 3] = [Self::Light, Self::Dark, Self::Sepia];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Dark => "Dark",
            Self::Sepia => "Sepia",
        }
    }

    /// Appearance name understood by the reading engine
    pub const fn appearance(self) -> &'static str {
        match self {
            Self::Light => "day",
            Self::Dark => "night",
            Self::Sepia => "sepia",
        }
    }
}

// ============================================================================
// Bookmarks and highlights
// ============================================================================

/// A saved reading position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: String,
    pub cfi: String,
    pub href: String,
    pub title: String,
    pub excerpt: String,
    pub timestamp: DateTime<Utc>,
}

/// Highlight swatches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HighlightColor {
    #[default]
    #[serde(rename = "#FFFF00")]
    Yellow,
    #[serde(rename = "#00FF00")]
    Green,
    #[serde(rename = "#00BFFF")]
    Blue,
    #[serde(rename = "#FF69B4")]
    Pink,
    #[serde(rename = "#FFA500")]
    Orange,
    #[serde(rename = "#9370DB")]
    Purple,
}

impl HighlightColor {
    pub const ALL: [Self; 6] = [
        Self::Yellow,
        Self::Green,
        Self::Blue,
        Self::Pink,
        Self::Orange,
        Self::Purple,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Yellow => "Yellow",
            Self::Green => "Green",
            Self::Blue => "Blue",
            Self::Pink => "Pink",
            Self::Orange => "Orange",
            Self::Purple => "Purple",
        }
    }

    pub const fn hex(self) -> &'static str {
        match self {
            Self::Yellow => "#FFFF00",
            Self::Green => "#00FF00",
            Self::Blue => "#00BFFF",
            Self::Pink => "#FF69B4",
            Self::Orange => "#FFA500",
            Self::Purple => "#9370DB",
        }
    }

    /// Look up a swatch by its hex value (case-insensitive)
    pub fn from_hex(hex: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|color| color.hex().eq_ignore_ascii_case(hex))
    }
}

/// A highlighted text span with an optional note
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    pub id: String,
    pub cfi: String,
    pub href: String,
    pub text: String,
    pub color: HighlightColor,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub note: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// Fields supplied by the note dialog when creating a highlight
#[derive(Debug, Clone, PartialEq)]
pub struct NewHighlight {
    pub cfi: String,
    pub href: String,
    pub text: String,
    pub color: HighlightColor,
    pub note: Option<String>,
}

/// Partial update of a highlight; `note: Some(None)` clears the note
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HighlightUpdate {
    pub color: Option<HighlightColor>,
    pub note: Option<Option<String>>,
}

/// Trim a note; blank notes become absent
pub fn normalize_note(note: Option<String>) -> Option<String> {
    note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())
}

// ============================================================================
// Navigation data
// ============================================================================

/// Table of contents entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TocItem {
    pub id: String,
    pub href: String,
    pub title: String,
    pub level: u32,
    pub children: Vec<TocItem>,
}

/// Book metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpubMetadata {
    pub title: String,
    pub author: String,
    pub identifier: String,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_date: Option<String>,
}

impl From<EngineMetadata> for EpubMetadata {
    fn from(meta: EngineMetadata) -> Self {
        Self {
            title: meta.title.unwrap_or_else(|| "Unknown Title".to_string()),
            author: meta
                .author
                .or(meta.creator)
                .unwrap_or_else(|| "Unknown Author".to_string()),
            identifier: meta.identifier.unwrap_or_default(),
            language: meta.language.unwrap_or_else(|| "en".to_string()),
            description: meta.description,
            publisher: meta.publisher,
            published_date: meta.published_date.or(meta.date),
        }
    }
}
