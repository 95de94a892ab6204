//! Reading engine bridge
//!
//! The engine that paginates and renders the publication is an external
//! collaborator. This module describes what the reader core needs from it:
//!
//! - [`EngineLoader`] opens a publication URL and hands back a handle plus an
//!   ordered event stream
//! - [`ReadingEngine`] is the handle: state accessors, settings application
//!   and the optional navigation calls it advertises through
//!   [`Capabilities`]
//!
//! Optional calls are resolved once, when the handle is attached to the
//! store (see [`AttachedEngine`]), instead of being probed on every call.

mod events;
mod settings;
mod types;

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::EngineError;

pub use events::{EngineEvent, Key};
pub use settings::UserSettings;
pub use types::{
    EngineMetadata, EngineTocEntry, Injectable, InjectableKind, Link, LoadOptions, LoadSettings,
    Locations, Locator, Rights,
};

/// Optional calls an engine implements
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    /// `get_current_locator` is available
    pub locator_accessor: bool,
    /// `go_to` accepts a full locator
    pub go_to: bool,
    /// `navigate_to` accepts an href
    pub navigate_to: bool,
    /// `next_page` / `previous_page` are available
    pub paging: bool,
}

/// Handle to a loaded publication
#[async_trait]
pub trait ReadingEngine: Send + Sync {
    /// Optional calls supported by this engine
    fn capabilities(&self) -> Capabilities;

    /// Locator of the visible position, if known
    fn current_locator(&self) -> Option<Locator>;

    /// Precomputed ordered reading positions (empty when not generated)
    fn positions(&self) -> Vec<Locator>;

    /// Publication reading order (spine)
    fn reading_order(&self) -> Vec<Link>;

    /// Reading-order link of the chapter being displayed
    fn current_chapter_link(&self) -> Option<Link>;

    /// Engine table of contents, if the publication has one
    fn table_of_contents(&self) -> Option<Vec<EngineTocEntry>>;

    /// Apply user settings; resolves once the engine has re-rendered
    async fn apply_user_settings(&self, settings: &UserSettings) -> Result<(), EngineError>;

    /// Explicit current-locator accessor
    fn get_current_locator(&self) -> Result<Locator, EngineError> {
        Err(EngineError::Unsupported("getCurrentLocator"))
    }

    async fn go_to(&self, _locator: &Locator) -> Result<(), EngineError> {
        Err(EngineError::Unsupported("goTo"))
    }

    async fn navigate_to(&self, _href: &str) -> Result<(), EngineError> {
        Err(EngineError::Unsupported("navigateTo"))
    }

    async fn next_page(&self) -> Result<(), EngineError> {
        Err(EngineError::Unsupported("nextPage"))
    }

    async fn previous_page(&self) -> Result<(), EngineError> {
        Err(EngineError::Unsupported("previousPage"))
    }

    /// Release engine resources
    async fn destroy(&self) {}
}

/// A freshly loaded engine and its event stream
pub struct LoadedEngine {
    pub handle: Arc<dyn ReadingEngine>,
    pub events: mpsc::UnboundedReceiver<EngineEvent>,
}

/// Opens publications in the external engine
#[async_trait]
pub trait EngineLoader: Send + Sync {
    async fn load(&self, options: LoadOptions) -> Result<LoadedEngine, EngineError>;
}

/// How navigation requests reach the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationMethod {
    /// Full locator via `go_to`
    GoTo,
    /// Bare href via `navigate_to`
    NavigateTo,
    Unsupported,
}

/// An engine handle with its capabilities resolved
#[derive(Clone)]
pub struct AttachedEngine {
    handle: Arc<dyn ReadingEngine>,
    capabilities: Capabilities,
    navigation: NavigationMethod,
}

impl AttachedEngine {
    /// Resolve the handle's capabilities once
    pub fn new(handle: Arc<dyn ReadingEngine>) -> Self {
        let capabilities = handle.capabilities();
        let navigation = if capabilities.go_to {
            NavigationMethod::GoTo
        } else if capabilities.navigate_to {
            NavigationMethod::NavigateTo
        } else {
            NavigationMethod::Unsupported
        };

        tracing::debug!(?capabilities, ?navigation, "Resolved engine capabilities");

        Self {
            handle,
            capabilities,
            navigation,
        }
    }

    pub fn handle(&self) -> &Arc<dyn ReadingEngine> {
        &self.handle
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn navigation(&self) -> NavigationMethod {
        self.navigation
    }
}

impl std::fmt::Debug for AttachedEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttachedEngine")
            .field("capabilities", &self.capabilities)
            .field("navigation", &self.navigation)
            .finish()
    }
}
