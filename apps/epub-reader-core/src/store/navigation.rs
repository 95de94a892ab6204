//! Navigation commands

use crate::engine::{Locator, NavigationMethod};

use super::ReaderStore;

/// Where to navigate: a resource href or a full locator
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationTarget {
    Href(String),
    Locator(Locator),
}

impl NavigationTarget {
    pub fn href(&self) -> &str {
        match self {
            Self::Href(href) => href,
            Self::Locator(locator) => &locator.href,
        }
    }

    /// Locator form; a bare href points at the start of its resource
    pub fn into_locator(self) -> Locator {
        match self {
            Self::Href(href) => Locator::at_start(href),
            Self::Locator(locator) => locator,
        }
    }
}

impl From<&str> for NavigationTarget {
    fn from(href: &str) -> Self {
        Self::Href(href.to_string())
    }
}

impl From<String> for NavigationTarget {
    fn from(href: String) -> Self {
        Self::Href(href)
    }
}

impl From<Locator> for NavigationTarget {
    fn from(locator: Locator) -> Self {
        Self::Locator(locator)
    }
}

impl ReaderStore {
    /// Navigate the engine and record the target href as the current location.
    ///
    /// Returns whether the engine accepted the request.
    pub async fn go_to_location(&self, target: impl Into<NavigationTarget>) -> bool {
        let target = target.into();
        let Some(engine) = self.engine() else {
            tracing::warn!(href = target.href(), "Navigation requested with no engine attached");
            return false;
        };

        let href = target.href().to_string();
        let result = match engine.navigation() {
            NavigationMethod::GoTo => {
                let locator = target.into_locator();
                tracing::debug!(href = %locator.href, "Navigating to locator");
                engine.handle().go_to(&locator).await
            }
            NavigationMethod::NavigateTo => {
                tracing::debug!(href = %href, "Navigating to href");
                engine.handle().navigate_to(&href).await
            }
            NavigationMethod::Unsupported => {
                tracing::error!(href = %href, "No navigation method available on engine");
                return false;
            }
        };

        match result {
            Ok(()) => {
                self.set_current_location(href);
                true
            }
            Err(e) => {
                tracing::error!(href = %href, error = %e, "Navigation failed");
                false
            }
        }
    }

    pub async fn next_page(&self) -> bool {
        self.turn_page(Direction::Forward).await
    }

    pub async fn previous_page(&self) -> bool {
        self.turn_page(Direction::Backward).await
    }

    async fn turn_page(&self, direction: Direction) -> bool {
        let Some(engine) = self.engine().filter(|e| e.capabilities().paging) else {
            tracing::warn!(?direction, "Page turning not available");
            return false;
        };

        let result = match direction {
            Direction::Forward => engine.handle().next_page().await,
            Direction::Backward => engine.handle().previous_page().await,
        };

        if let Err(e) = result {
            tracing::error!(?direction, error = %e, "Page turn failed");
            return false;
        }
        true
    }
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Forward,
    Backward,
}
