//! Reading preference setters
//!
//! Each setter clamps its input, updates and persists the store copy, then
//! forwards a single-field patch to the attached engine. An engine rejection
//! is logged and the local value stays.

use crate::engine::UserSettings;
use crate::types::{FontFamily, ReaderSettings, Theme};

use super::ReaderStore;

impl ReaderStore {
    pub async fn set_font_size(&self, size: u32) {
        let size = ReaderSettings::clamp_font_size(size);
        self.update(true, |state| state.settings.font_size = size);
        self.forward_settings(UserSettings::font_size(size)).await;
    }

    pub async fn set_font_family(&self, family: FontFamily) {
        self.update(true, |state| state.settings.font_family = family);
        self.forward_settings(UserSettings::font_family(family)).await;
    }

    pub async fn set_theme(&self, theme: Theme) {
        self.update(true, |state| state.settings.theme = theme);
        self.forward_settings(UserSettings::theme(theme)).await;
    }

    pub async fn set_line_height(&self, height: f64) {
        let Some(height) = ReaderSettings::clamp_line_height(height) else {
            tracing::warn!(height, "Ignoring non-finite line height");
            return;
        };
        self.update(true, |state| state.settings.line_height = height);
        self.forward_settings(UserSettings::line_height(height)).await;
    }

    pub async fn set_margin_size(&self, size: u32) {
        let size = ReaderSettings::clamp_margin_size(size);
        self.update(true, |state| state.settings.margin_size = size);
        self.forward_settings(UserSettings::margins(size)).await;
    }

    pub(super) async fn forward_settings(&self, patch: UserSettings) {
        let Some(engine) = self.engine() else {
            return;
        };

        if let Err(e) = engine.handle().apply_user_settings(&patch).await {
            tracing::error!(error = %e, ?patch, "Engine rejected reader settings");
        }
    }
}
