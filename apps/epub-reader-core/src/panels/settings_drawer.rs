use crate::store::ReaderStore;
use crate::types::{
    FontFamily, ReaderSettings, Theme, FONT_SIZE_RANGE, LINE_HEIGHT_RANGE, LINE_HEIGHT_STEP,
    MARGIN_SIZE_RANGE,
};

/// Bounds and step of a settings slider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

pub struct SettingsDrawer {
    store: ReaderStore,
}

impl SettingsDrawer {
    pub const FONT_SIZE: SliderRange = SliderRange {
        min: *FONT_SIZE_RANGE.start() as f64,
        max: *FONT_SIZE_RANGE.end() as f64,
        step: 1.0,
    };

    pub const LINE_HEIGHT: SliderRange = SliderRange {
        min: *LINE_HEIGHT_RANGE.start(),
        max: *LINE_HEIGHT_RANGE.end(),
        step: LINE_HEIGHT_STEP,
    };

    pub const MARGIN_SIZE: SliderRange = SliderRange {
        min: *MARGIN_SIZE_RANGE.start() as f64,
        max: *MARGIN_SIZE_RANGE.end() as f64,
        step: 1.0,
    };

    pub fn new(store: ReaderStore) -> Self {
        Self { store }
    }

    pub fn font_families(&self) -> &'static [FontFamily] {
        &FontFamily::ALL
    }

    pub fn themes(&self) -> &'static [Theme] {
        &Theme::ALL
    }

    pub fn current(&self) -> ReaderSettings {
        self.store.snapshot().settings
    }

    pub fn is_open(&self) -> bool {
        self.store.snapshot().is_settings_open
    }

    pub fn close(&self) {
        self.store.set_settings_open(false);
    }

    pub async fn set_font_size(&self, size: u32) {
        self.store.set_font_size(size).await;
    }

    pub async fn set_font_family(&self, family: FontFamily) {
        self.store.set_font_family(family).await;
    }

    pub async fn set_theme(&self, theme: Theme) {
        self.store.set_theme(theme).await;
    }

    pub async fn set_line_height(&self, height: f64) {
        self.store.set_line_height(height).await;
    }

    pub async fn set_margin_size(&self, size: u32) {
        self.store.set_margin_size(size).await;
    }
}
