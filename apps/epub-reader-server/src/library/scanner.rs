//! Publication lookup in the public directory

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::Result;

const EPUB_EXTENSION: &str = "epub";

/// A publication file found in the public directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicationFile {
    pub filename: String,
    pub size: u64,
}

/// Read-only view over the directory that holds the served files
#[derive(Debug, Clone)]
pub struct PublicLibrary {
    root: PathBuf,
}

impl PublicLibrary {
    /// Create a library rooted at `root`
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Root directory of the library
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a bare filename to a regular file inside the root.
    ///
    /// Names carrying path separators or parent references never resolve.
    pub async fn resolve(&self, filename: &str) -> Option<PathBuf> {
        if !is_plain_filename(filename) {
            tracing::debug!("Rejected non-plain filename: {:?}", filename);
            return None;
        }

        let path = self.root.join(filename);
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Some(path),
            _ => None,
        }
    }

    /// List every EPUB in the root, sorted by filename
    pub async fn scan(&self) -> Result<Vec<PublicationFile>> {
        let mut entries = tokio::fs::read_dir(&self.root).await?;
        let mut publications = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let is_epub = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.eq_ignore_ascii_case(EPUB_EXTENSION))
                .unwrap_or(false);
            if !is_epub {
                continue;
            }

            let meta = entry.metadata().await?;
            if !meta.is_file() {
                continue;
            }

            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                publications.push(PublicationFile {
                    filename: name.to_string(),
                    size: meta.len(),
                });
            }
        }

        publications.sort_by(|a, b| a.filename.cmp(&b.filename));
        tracing::debug!("Found {} publications in {}", publications.len(), self.root.display());
        Ok(publications)
    }
}

fn is_plain_filename(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains('\\')
        && !name.contains('\0')
}
