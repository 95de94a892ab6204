//! Engine-facing user settings

use serde::Serialize;

use crate::types::{FontFamily, ReaderSettings, Theme};

/// Settings payload for `apply_user_settings`.
///
/// Absent fields are left untouched by the engine, so a single-field patch
/// only changes that field.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appearance: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_margins: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_scroll: Option<bool>,
}

impl UserSettings {
    /// Every setting, with vertical scrolling enabled
    pub fn full(settings: &ReaderSettings) -> Self {
        Self {
            font_size: Some(settings.font_size),
            font_family: Some(settings.font_family.engine_family().to_string()),
            appearance: Some(settings.theme.appearance().to_string()),
            line_height: Some(settings.line_height),
            page_margins: Some(settings.margin_size),
            vertical_scroll: Some(true),
        }
    }

    pub fn font_size(size: u32) -> Self {
        Self {
            font_size: Some(size),
            ..Default::default()
        }
    }

    pub fn font_family(family: FontFamily) -> Self {
        Self {
            font_family: Some(family.engine_family().to_string()),
            ..Default::default()
        }
    }

    pub fn theme(theme: Theme) -> Self {
        Self {
            appearance: Some(theme.appearance().to_string()),
            ..Default::default()
        }
    }

    pub fn line_height(height: f64) -> Self {
        Self {
            line_height: Some(height),
            ..Default::default()
        }
    }

    pub fn margins(size: u32) -> Self {
        Self {
            page_margins: Some(size),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_settings() {
        let settings = ReaderSettings {
            font_family: FontFamily::Arial,
            theme: Theme::Sepia,
            ..Default::default()
        };
        let json = serde_json::to_value(UserSettings::full(&settings)).unwrap();

        assert_eq!(json["fontSize"], 16);
        assert_eq!(json["fontFamily"], "sans-serif");
        assert_eq!(json["appearance"], "sepia");
        assert_eq!(json["lineHeight"], 1.4);
        assert_eq!(json["pageMargins"], 2);
        assert_eq!(json["verticalScroll"], true);
    }

    #[test]
    fn test_patch_carries_one_field() {
        let json = serde_json::to_value(UserSettings::theme(Theme::Dark)).unwrap();
        let object = json.as_object().unwrap();

        assert_eq!(object.len(), 1);
        assert_eq!(object["appearance"], "night");
    }
}
