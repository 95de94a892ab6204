//! Reader viewport
//!
//! Boots the reading engine for a publication URL and keeps the store in sync
//! with the engine's event stream.

use reqwest::Url;
use tokio::sync::mpsc;

use crate::config::ViewerConfig;
use crate::engine::{EngineEvent, EngineLoader, LoadOptions, LoadSettings, LoadedEngine, Rights};
use crate::error::ViewportError;
use crate::progress::{reconcile, ProgressInputs};
use crate::store::ReaderStore;
use crate::toc::convert_toc;
use crate::types::EpubMetadata;

pub struct ReaderViewport<L> {
    store: ReaderStore,
    loader: L,
    config: ViewerConfig,
    http: reqwest::Client,
}

impl<L: EngineLoader> ReaderViewport<L> {
    pub fn new(store: ReaderStore, loader: L, config: ViewerConfig) -> Self {
        Self::with_client(store, loader, config, reqwest::Client::new())
    }

    /// Use a preconfigured HTTP client for the reachability probe
    pub fn with_client(
        store: ReaderStore,
        loader: L,
        config: ViewerConfig,
        http: reqwest::Client,
    ) -> Self {
        Self {
            store,
            loader,
            config,
            http,
        }
    }

    pub fn store(&self) -> &ReaderStore {
        &self.store
    }

    /// Resolve the publication URL; relative targets are joined onto the base origin
    pub fn resolve_url(&self, target: Option<&str>) -> Result<Url, ViewportError> {
        let raw = target
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(&self.config.default_url);

        Url::parse(raw)
            .or_else(|_| Url::parse(&self.config.base_origin).and_then(|base| base.join(raw)))
            .map_err(|e| ViewportError::InvalidUrl(format!("{}: {}", raw, e)))
    }

    /// Check the publication is reachable before handing it to the engine
    async fn probe(&self, url: &Url) -> Result<(), ViewportError> {
        if !matches!(url.scheme(), "http" | "https") {
            return Ok(());
        }

        let response = self
            .http
            .head(url.clone())
            .send()
            .await
            .map_err(|e| ViewportError::Unreachable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ViewportError::Unreachable(format!(
                "{} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("")
            )));
        }
        Ok(())
    }

    /// Open a publication and attach its engine.
    ///
    /// On failure the error is also recorded in the store's `load_error`.
    pub async fn boot(
        &self,
        target: Option<&str>,
    ) -> Result<mpsc::UnboundedReceiver<EngineEvent>, ViewportError> {
        self.store.set_load_error(None);
        self.store.set_loading(true);

        match self.try_boot(target).await {
            Ok(events) => Ok(events),
            Err(e) => {
                tracing::error!(error = %e, "Failed to initialize reader");
                self.store.set_load_error(Some(e.to_string()));
                self.store.set_loading(false);
                Err(e)
            }
        }
    }

    async fn try_boot(
        &self,
        target: Option<&str>,
    ) -> Result<mpsc::UnboundedReceiver<EngineEvent>, ViewportError> {
        let url = self.resolve_url(target)?;
        if self.config.probe_url {
            self.probe(&url).await?;
        }

        tracing::info!(url = %url, "Loading publication");

        let options = LoadOptions {
            url: url.to_string(),
            injectables: self.config.injectables.clone(),
            settings: LoadSettings {
                vertical_scroll: self.config.vertical_scroll,
                enable_gpu_hardware_acceleration: self.config.enable_gpu_hardware_acceleration,
            },
            rights: Rights {
                auto_generate_positions: true,
            },
        };

        let LoadedEngine { handle, events } = self.loader.load(options).await?;
        self.store.attach_engine(handle).await;

        self.update_progress();
        self.load_toc();
        self.store.set_loading(false);

        tracing::info!(url = %url, "Reader initialized");
        Ok(events)
    }

    /// React to one engine event
    pub fn handle_event(&self, event: &EngineEvent) {
        match event {
            EngineEvent::Metadata(metadata) => {
                let metadata = EpubMetadata::from(metadata.clone());
                tracing::debug!(title = %metadata.title, "Publication metadata received");
                self.store.set_metadata(metadata);
            }
            EngineEvent::Ready => {
                self.update_progress();
                self.load_toc();
                self.store.set_loading(false);
            }
            event if event.affects_position() => {
                self.update_progress();
            }
            event => {
                tracing::trace!(event = event.name(), "Ignoring engine event");
            }
        }
    }

    /// Consume engine events in order until the stream closes
    pub async fn run(&self, mut events: mpsc::UnboundedReceiver<EngineEvent>) {
        while let Some(event) = events.recv().await {
            self.handle_event(&event);
        }
        tracing::debug!("Engine event stream closed");
    }

    /// Recompute book-wide progress from the engine.
    ///
    /// Returns the new value, or `None` when progress was left unchanged.
    pub fn update_progress(&self) -> Option<f64> {
        let engine = self.store.engine()?;
        let inputs = ProgressInputs::from_engine(engine.handle().as_ref());

        if let Some(locator) = &inputs.locator {
            self.store.set_current_location(locator.href.clone());
        }

        match reconcile(&inputs) {
            Ok(Some(reconciled)) => {
                tracing::debug!(
                    progress = reconciled.value,
                    source = ?reconciled.source,
                    "Progress updated"
                );
                self.store.set_progress(reconciled.value);
                Some(reconciled.value)
            }
            Ok(None) => None,
            Err(e) => {
                tracing::error!(error = %e, "Error updating progress");
                None
            }
        }
    }

    /// Mirror the engine's table of contents into the store
    pub fn load_toc(&self) {
        let Some(engine) = self.store.engine() else {
            return;
        };

        let toc = engine
            .handle()
            .table_of_contents()
            .map(|entries| convert_toc(&entries))
            .unwrap_or_default();
        tracing::debug!(entries = toc.len(), "Table of contents loaded");
        self.store.set_toc(toc);
    }

    /// Detach and destroy the engine
    pub async fn shutdown(&self) {
        if let Some(engine) = self.store.reset_reader() {
            engine.handle().destroy().await;
            tracing::info!("Reading engine destroyed");
        }
    }
}
