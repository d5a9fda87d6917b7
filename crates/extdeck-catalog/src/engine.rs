//! Wiring of pipeline, dispatcher and shared state
//!
//! [`CatalogEngine::start`] owns the tracker and the catalog cache and hands
//! the same handles to the reconciliation pipeline and the dispatcher.

use crate::cache::CatalogCache;
use crate::dispatcher::OperationDispatcher;
use crate::pipeline::{PipelineHandle, ReconciliationPipeline};
use crate::presenter::{presentation_channel, PresentationLoop};
use crate::source::{CatalogSources, ExtensionManager, LanguageSource};
use crate::tracker::InstallTracker;
use extdeck_core::types::Catalog;
use extdeck_core::CatalogConfig;
use std::sync::Arc;
use tracing::info;

/// A running catalog: reconciliation plus operations
pub struct CatalogEngine {
    dispatcher: OperationDispatcher,
    pipeline: PipelineHandle,
    tracker: Arc<InstallTracker>,
}

impl CatalogEngine {
    /// Start reconciling `sources` and return the engine with the loop that
    /// must run on the presentation task
    pub fn start(
        sources: CatalogSources,
        manager: Arc<dyn ExtensionManager>,
        languages: Arc<dyn LanguageSource>,
        config: &CatalogConfig,
    ) -> (Self, PresentationLoop) {
        let tracker = Arc::new(InstallTracker::new());
        let cache = Arc::new(CatalogCache::new());
        let (view, presentation) = presentation_channel();

        let pipeline = ReconciliationPipeline::new(
            sources,
            languages,
            tracker.clone(),
            cache.clone(),
            view.clone(),
        )
        .with_debounce(config.debounce())
        .spawn();

        manager.find_available_extensions();
        let dispatcher = OperationDispatcher::new(manager, tracker.clone(), cache, view);

        info!(debounce_ms = config.debounce_ms, "Extension catalog started");

        (
            Self {
                dispatcher,
                pipeline,
                tracker,
            },
            presentation,
        )
    }

    pub fn dispatcher(&self) -> &OperationDispatcher {
        &self.dispatcher
    }

    pub fn tracker(&self) -> &InstallTracker {
        &self.tracker
    }

    /// Last published catalog
    pub fn latest(&self) -> Option<Arc<Catalog>> {
        self.pipeline.latest()
    }

    /// Stop reconciliation. In-flight installs keep running until cancelled.
    pub fn shutdown(&self) {
        self.pipeline.shutdown();
    }
}
