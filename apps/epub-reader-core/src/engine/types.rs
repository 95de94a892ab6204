//! Data exchanged with the reading engine
//!
//! Shapes follow the Readium locator and link models so engine payloads can be
//! deserialized directly.

use serde::{Deserialize, Serialize};

/// A position inside the publication
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Locator {
    /// Resource the position points into
    pub href: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub locations: Locations,
    /// Text around the position, when the engine provides it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Locator {
    /// Locator pointing at the start of a resource
    pub fn at_start(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            locations: Locations {
                progression: Some(0.0),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

/// Location details of a [`Locator`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Locations {
    /// Progression within the resource (0.0-1.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progression: Option<f64>,
    /// Progression within the whole publication (0.0-1.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_progression: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cfi: Option<String>,
}

/// A reading-order link
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// A table of contents node as the engine reports it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineTocEntry {
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub children: Option<Vec<EngineTocEntry>>,
}

/// Publication metadata as the engine reports it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
    pub creator: Option<String>,
    pub identifier: Option<String>,
    pub language: Option<String>,
    pub description: Option<String>,
    pub publisher: Option<String>,
    pub published_date: Option<String>,
    pub date: Option<String>,
}

// ============================================================================
// Load options
// ============================================================================

/// Options passed to the engine loader
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadOptions {
    pub url: String,
    pub injectables: Vec<Injectable>,
    pub settings: LoadSettings,
    pub rights: Rights,
}

/// A stylesheet or script injected into every resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Injectable {
    #[serde(rename = "type")]
    pub kind: InjectableKind,
    pub url: String,
    #[serde(rename = "r2before", skip_serializing_if = "std::ops::Not::not", default)]
    pub before: bool,
    #[serde(rename = "r2default", skip_serializing_if = "std::ops::Not::not", default)]
    pub default: bool,
    #[serde(rename = "r2after", skip_serializing_if = "std::ops::Not::not", default)]
    pub after: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InjectableKind {
    Style,
    Script,
}

impl Injectable {
    pub fn style(url: impl Into<String>) -> Self {
        Self {
            kind: InjectableKind::Style,
            url: url.into(),
            before: false,
            default: false,
            after: false,
        }
    }

    /// The ReadiumCSS before/default/after stylesheets under `base`
    pub fn readium_css(base: &str) -> Vec<Self> {
        let base = base.trim_end_matches('/');
        vec![
            Self {
                before: true,
                ..Self::style(format!("{}/ReadiumCSS-before.css", base))
            },
            Self {
                default: true,
                ..Self::style(format!("{}/ReadiumCSS-default.css", base))
            },
            Self {
                after: true,
                ..Self::style(format!("{}/ReadiumCSS-after.css", base))
            },
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadSettings {
    pub vertical_scroll: bool,
    #[serde(rename = "enableGPUHardwareAcceleration")]
    pub enable_gpu_hardware_acceleration: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rights {
    /// Ask the engine to compute the positions list used for book-wide progress
    pub auto_generate_positions: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locator_from_engine_json() {
        let locator: Locator = serde_json::from_str(
            r#"{
                "href": "OEBPS/ch02.xhtml",
                "type": "application/xhtml+xml",
                "locations": {"progression": 0.25, "totalProgression": 0.42, "position": 7}
            }"#,
        )
        .unwrap();

        assert_eq!(locator.href, "OEBPS/ch02.xhtml");
        assert_eq!(locator.locations.progression, Some(0.25));
        assert_eq!(locator.locations.total_progression, Some(0.42));
        assert_eq!(locator.locations.cfi, None);
    }

    #[test]
    fn test_locator_without_locations() {
        let locator: Locator = serde_json::from_str(r#"{"href": "a.xhtml"}"#).unwrap();
        assert_eq!(locator.locations, Locations::default());
    }

    #[test]
    fn test_readium_css_injectables() {
        let injectables = Injectable::readium_css("/readium-css/");
        let json = serde_json::to_value(&injectables).unwrap();

        assert_eq!(json[0]["url"], "/readium-css/ReadiumCSS-before.css");
        assert_eq!(json[0]["type"], "style");
        assert_eq!(json[0]["r2before"], true);
        assert!(json[0].get("r2after").is_none());
        assert_eq!(json[2]["r2after"], true);
    }

    #[test]
    fn test_load_options_keys() {
        let options = LoadOptions {
            url: "http://localhost:3003/epub/games.epub".to_string(),
            injectables: Vec::new(),
            settings: LoadSettings {
                vertical_scroll: true,
                enable_gpu_hardware_acceleration: true,
            },
            rights: Rights {
                auto_generate_positions: true,
            },
        };
        let json = serde_json::to_value(&options).unwrap();

        assert_eq!(json["settings"]["verticalScroll"], true);
        assert_eq!(json["settings"]["enableGPUHardwareAcceleration"], true);
        assert_eq!(json["rights"]["autoGeneratePositions"], true);
    }
}
