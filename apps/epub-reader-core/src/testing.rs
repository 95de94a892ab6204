//! Scripted engine doubles for tests

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::engine::{
    Capabilities, EngineEvent, EngineLoader, EngineTocEntry, LoadOptions, LoadedEngine, Link,
    Locator, ReadingEngine, UserSettings,
};
use crate::error::EngineError;

/// A navigation request received by [`ScriptedEngine`]
#[derive(Debug, Clone, PartialEq)]
pub enum Navigation {
    GoTo(Locator),
    NavigateTo(String),
    Next,
    Previous,
}

#[derive(Default)]
struct Script {
    locator: Option<Locator>,
    positions: Vec<Locator>,
    reading_order: Vec<Link>,
    chapter: Option<Link>,
    toc: Option<Vec<EngineTocEntry>>,
    applied: Vec<UserSettings>,
    navigations: Vec<Navigation>,
    fail_settings: bool,
    fail_navigation: bool,
    destroyed: bool,
}

/// Engine whose state is set by the test and which records every call
pub struct ScriptedEngine {
    capabilities: Capabilities,
    script: Mutex<Script>,
}

impl ScriptedEngine {
    pub fn new(capabilities: Capabilities) -> Self {
        Self {
            capabilities,
            script: Mutex::new(Script::default()),
        }
    }

    /// Engine advertising every optional call
    pub fn full() -> Self {
        Self::new(Capabilities {
            locator_accessor: true,
            go_to: true,
            navigate_to: true,
            paging: true,
        })
    }

    pub fn set_locator(&self, locator: Option<Locator>) {
        self.script.lock().locator = locator;
    }

    pub fn set_positions(&self, positions: Vec<Locator>) {
        self.script.lock().positions = positions;
    }

    pub fn set_spine(&self, reading_order: Vec<Link>, chapter: Option<Link>) {
        let mut script = self.script.lock();
        script.reading_order = reading_order;
        script.chapter = chapter;
    }

    pub fn set_toc(&self, toc: Option<Vec<EngineTocEntry>>) {
        self.script.lock().toc = toc;
    }

    pub fn fail_settings(&self, fail: bool) {
        self.script.lock().fail_settings = fail;
    }

    pub fn fail_navigation(&self, fail: bool) {
        self.script.lock().fail_navigation = fail;
    }

    /// Settings patches the engine accepted
    pub fn applied(&self) -> Vec<UserSettings> {
        self.script.lock().applied.clone()
    }

    /// Navigation requests the engine accepted
    pub fn navigations(&self) -> Vec<Navigation> {
        self.script.lock().navigations.clone()
    }

    pub fn is_destroyed(&self) -> bool {
        self.script.lock().destroyed
    }

    fn navigate(&self, navigation: Navigation) -> Result<(), EngineError> {
        let mut script = self.script.lock();
        if script.fail_navigation {
            return Err(EngineError::Call("navigation rejected".to_string()));
        }
        script.navigations.push(navigation);
        Ok(())
    }
}

#[async_trait]
impl ReadingEngine for ScriptedEngine {
    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn current_locator(&self) -> Option<Locator> {
        self.script.lock().locator.clone()
    }

    fn positions(&self) -> Vec<Locator> {
        self.script.lock().positions.clone()
    }

    fn reading_order(&self) -> Vec<Link> {
        self.script.lock().reading_order.clone()
    }

    fn current_chapter_link(&self) -> Option<Link> {
        self.script.lock().chapter.clone()
    }

    fn table_of_contents(&self) -> Option<Vec<EngineTocEntry>> {
        self.script.lock().toc.clone()
    }

    async fn apply_user_settings(&self, settings: &UserSettings) -> Result<(), EngineError> {
        let mut script = self.script.lock();
        if script.fail_settings {
            return Err(EngineError::Call("settings rejected".to_string()));
        }
        script.applied.push(settings.clone());
        Ok(())
    }

    fn get_current_locator(&self) -> Result<Locator, EngineError> {
        if !self.capabilities.locator_accessor {
            return Err(EngineError::Unsupported("getCurrentLocator"));
        }
        self.script
            .lock()
            .locator
            .clone()
            .ok_or_else(|| EngineError::Call("no locator".to_string()))
    }

    async fn go_to(&self, locator: &Locator) -> Result<(), EngineError> {
        self.navigate(Navigation::GoTo(locator.clone()))
    }

    async fn navigate_to(&self, href: &str) -> Result<(), EngineError> {
        self.navigate(Navigation::NavigateTo(href.to_string()))
    }

    async fn next_page(&self) -> Result<(), EngineError> {
        self.navigate(Navigation::Next)
    }

    async fn previous_page(&self) -> Result<(), EngineError> {
        self.navigate(Navigation::Previous)
    }

    async fn destroy(&self) {
        self.script.lock().destroyed = true;
    }
}

/// Loader handing out one [`ScriptedEngine`] with a scripted event sequence
pub struct ScriptedLoader {
    pub engine: Arc<ScriptedEngine>,
    events: Vec<EngineEvent>,
    failure: Option<EngineError>,
    requests: Mutex<Vec<LoadOptions>>,
}

impl ScriptedLoader {
    pub fn new(engine: Arc<ScriptedEngine>, events: Vec<EngineEvent>) -> Self {
        Self {
            engine,
            events,
            failure: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: EngineError) -> Self {
        Self {
            failure: Some(error),
            ..Self::new(Arc::new(ScriptedEngine::full()), Vec::new())
        }
    }

    /// Options of every load request
    pub fn requests(&self) -> Vec<LoadOptions> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl EngineLoader for ScriptedLoader {
    async fn load(&self, options: LoadOptions) -> Result<LoadedEngine, EngineError> {
        self.requests.lock().push(options);
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }

        let (tx, events) = mpsc::unbounded_channel();
        for event in &self.events {
            let _ = tx.send(event.clone());
        }

        Ok(LoadedEngine {
            handle: self.engine.clone(),
            events,
        })
    }
}
