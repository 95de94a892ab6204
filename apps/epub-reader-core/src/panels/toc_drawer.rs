use crate::engine::{Locations, Locator};
use crate::store::{NavigationTarget, ReaderStore};
use crate::toc::flatten;
use crate::types::Bookmark;

use super::{format_date, truncate_text};

const EXCERPT_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TocTab {
    #[default]
    Contents,
    Bookmarks,
}

/// One line of the flattened table of contents
#[derive(Debug, Clone, PartialEq)]
pub struct TocRow {
    pub id: String,
    pub href: String,
    pub title: String,
    pub level: u32,
    /// Left padding in layout units
    pub indent: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookmarkRow {
    pub id: String,
    pub title: String,
    pub date: String,
    pub excerpt: String,
}

impl From<&Bookmark> for BookmarkRow {
    fn from(bookmark: &Bookmark) -> Self {
        Self {
            id: bookmark.id.clone(),
            title: bookmark.title.clone(),
            date: format_date(bookmark.timestamp),
            excerpt: truncate_text(&bookmark.excerpt, EXCERPT_CHARS),
        }
    }
}

pub struct TocDrawer {
    store: ReaderStore,
    tab: TocTab,
}

impl TocDrawer {
    pub fn new(store: ReaderStore) -> Self {
        Self {
            store,
            tab: TocTab::default(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.store.snapshot().is_toc_open
    }

    pub fn close(&self) {
        self.store.set_toc_open(false);
    }

    pub fn tab(&self) -> TocTab {
        self.tab
    }

    pub fn set_tab(&mut self, tab: TocTab) {
        self.tab = tab;
    }

    /// `(title, "by <author>")` header, once metadata is known
    pub fn header(&self) -> Option<(String, String)> {
        self.store
            .snapshot()
            .metadata
            .map(|m| (m.title, format!("by {}", m.author)))
    }

    pub fn rows(&self) -> Vec<TocRow> {
        let state = self.store.snapshot();
        flatten(&state.toc)
            .into_iter()
            .map(|item| TocRow {
                id: item.id.clone(),
                href: item.href.clone(),
                title: item.title.clone(),
                level: item.level,
                indent: 2 + item.level * 2,
            })
            .collect()
    }

    /// Navigate to an entry and close the drawer
    pub async fn select(&self, row: &TocRow) {
        self.store.go_to_location(row.href.as_str()).await;
        self.close();
    }

    pub fn bookmarks(&self) -> Vec<BookmarkRow> {
        self.store.snapshot().bookmarks.iter().map(BookmarkRow::from).collect()
    }

    pub fn add_bookmark(&self) -> Option<Bookmark> {
        self.store.create_bookmark()
    }

    /// Navigate to a bookmark, using its cfi when it has one, and close the drawer
    pub async fn open_bookmark(&self, id: &str) -> bool {
        let Some(bookmark) = self
            .store
            .snapshot()
            .bookmarks
            .into_iter()
            .find(|b| b.id == id)
        else {
            return false;
        };

        let target = if bookmark.cfi.is_empty() {
            NavigationTarget::Href(bookmark.href)
        } else {
            NavigationTarget::Locator(Locator {
                href: bookmark.href,
                locations: Locations {
                    cfi: Some(bookmark.cfi),
                    ..Default::default()
                },
                ..Default::default()
            })
        };

        let navigated = self.store.go_to_location(target).await;
        self.close();
        navigated
    }

    pub fn remove_bookmark(&self, id: &str) -> bool {
        self.store.remove_bookmark(id)
    }
}
