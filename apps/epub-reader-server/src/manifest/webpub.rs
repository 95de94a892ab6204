//! Web Publication Manifest generation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// JSON-LD context of a Readium Web Publication Manifest
pub const WEBPUB_CONTEXT: &str = "https://readium.org/webpub-manifest/context.jsonld";

/// Link relations
pub mod rel {
    pub const SELF: &str = "self";
}

/// MIME types used in manifests
pub mod mime {
    pub const EPUB: &str = "application/epub+zip";
    pub const WEBPUB: &str = "application/webpub+json";
}

/// A Readium Web Publication Manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebPubManifest {
    #[serde(rename = "@context")]
    pub context: Vec<String>,
    pub metadata: ManifestMetadata,
    pub links: Vec<ManifestLink>,
    #[serde(rename = "readingOrder")]
    pub reading_order: Vec<ManifestLink>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestMetadata {
    pub title: String,
    pub identifier: String,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestLink {
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rel: Option<String>,
    #[serde(rename = "type")]
    pub link_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl WebPubManifest {
    /// Manifest for a single EPUB served by this server.
    ///
    /// The reading order holds one item: the byte-range stream of the file.
    pub fn for_epub(base_url: &str, filename: &str, generated_at: DateTime<Utc>) -> Self {
        let title = publication_title(filename);

        Self {
            context: vec![WEBPUB_CONTEXT.to_string()],
            metadata: ManifestMetadata {
                title: title.clone(),
                identifier: format!("epub-{}", generated_at.timestamp_millis()),
                language: "en".to_string(),
            },
            links: vec![ManifestLink {
                href: manifest_url(base_url, filename),
                rel: Some(rel::SELF.to_string()),
                link_type: mime::WEBPUB.to_string(),
                title: None,
            }],
            reading_order: vec![ManifestLink {
                href: stream_url(base_url, filename),
                rel: None,
                link_type: mime::EPUB.to_string(),
                title: Some(title),
            }],
        }
    }
}

/// Title shown for a publication: its filename without the `.epub` suffix
pub fn publication_title(filename: &str) -> String {
    filename
        .strip_suffix(".epub")
        .unwrap_or(filename)
        .to_string()
}

/// Absolute URL of the manifest route for `filename`
pub fn manifest_url(base_url: &str, filename: &str) -> String {
    format!("{}/manifest/{}", base_url, urlencoding::encode(filename))
}

/// Absolute URL of the byte-range stream for `filename`
pub fn stream_url(base_url: &str, filename: &str) -> String {
    format!("{}/epub/{}", base_url, urlencoding::encode(filename))
}
