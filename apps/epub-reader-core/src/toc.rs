//! Table of contents conversion

use uuid::Uuid;

use crate::engine::EngineTocEntry;
use crate::types::TocItem;

/// Convert the engine's TOC tree into [`TocItem`]s.
///
/// Levels follow recursion depth from 0; missing titles read "Untitled" and
/// entries without an href get a generated id.
pub fn convert_toc(entries: &[EngineTocEntry]) -> Vec<TocItem> {
    entries.iter().map(|entry| convert_entry(entry, 0)).collect()
}

fn convert_entry(entry: &EngineTocEntry, level: u32) -> TocItem {
    let href = entry.href.clone().unwrap_or_default();
    let id = match &entry.href {
        Some(href) if !href.is_empty() => href.clone(),
        _ => format!("toc-{}", Uuid::new_v4()),
    };

    TocItem {
        id,
        href,
        title: entry
            .title
            .clone()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| "Untitled".to_string()),
        level,
        children: entry
            .children
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|child| convert_entry(child, level + 1))
            .collect(),
    }
}

/// Depth-first flattening, parents before their children
pub fn flatten(items: &[TocItem]) -> Vec<&TocItem> {
    let mut out = Vec::new();
    for item in items {
        out.push(item);
        out.extend(flatten(&item.children));
    }
    out
}
