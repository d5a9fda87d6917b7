//! Debounced reconciliation of the three catalog sources
//!
//! A single actor task keeps the latest snapshot from each source. Once the
//! installed and untrusted sources have each emitted (the available source
//! starts out empty), every emission restarts a debounce timer. When the
//! timer fires the actor merges the current snapshots, caches the result and
//! queues it for the presentation task.
//!
//! A failing source ends the pipeline. The failure is reported once and the
//! last published catalog stays in the cache.

use crate::cache::CatalogCache;
use crate::merger;
use crate::presenter::ViewSender;
use crate::source::{CatalogSources, LanguageSource, SnapshotStream};
use crate::tracker::InstallTracker;
use extdeck_core::config::DEFAULT_DEBOUNCE_MS;
use extdeck_core::types::ExtensionRecord;
use extdeck_core::{Error, Result};
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Identifies one of the three sources in logs and errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SourceKind {
    Installed,
    Untrusted,
    Available,
}

impl SourceKind {
    fn name(self) -> &'static str {
        match self {
            Self::Installed => "installed",
            Self::Untrusted => "untrusted",
            Self::Available => "available",
        }
    }
}

/// Latest value seen from each source
#[derive(Debug)]
struct LatestSnapshots {
    installed: Option<Vec<ExtensionRecord>>,
    untrusted: Option<Vec<ExtensionRecord>>,
    available: Option<Vec<ExtensionRecord>>,
}

impl LatestSnapshots {
    fn new() -> Self {
        Self {
            installed: None,
            untrusted: None,
            available: Some(Vec::new()),
        }
    }

    fn slot(&mut self, kind: SourceKind) -> &mut Option<Vec<ExtensionRecord>> {
        match kind {
            SourceKind::Installed => &mut self.installed,
            SourceKind::Untrusted => &mut self.untrusted,
            SourceKind::Available => &mut self.available,
        }
    }

    /// All three snapshots, once every source has a value
    fn ready(&self) -> Option<(&[ExtensionRecord], &[ExtensionRecord], &[ExtensionRecord])> {
        Some((
            self.installed.as_deref()?,
            self.untrusted.as_deref()?,
            self.available.as_deref()?,
        ))
    }
}

/// Source stream that remembers whether it has ended
struct TrackedSource {
    kind: SourceKind,
    stream: SnapshotStream,
    open: bool,
}

impl TrackedSource {
    fn new(kind: SourceKind, stream: SnapshotStream) -> Self {
        Self {
            kind,
            stream,
            open: true,
        }
    }
}

/// Builder and body of the reconciliation actor
pub struct ReconciliationPipeline {
    sources: CatalogSources,
    languages: Arc<dyn LanguageSource>,
    tracker: Arc<InstallTracker>,
    cache: Arc<CatalogCache>,
    view: ViewSender,
    debounce: Duration,
}

impl ReconciliationPipeline {
    pub fn new(
        sources: CatalogSources,
        languages: Arc<dyn LanguageSource>,
        tracker: Arc<InstallTracker>,
        cache: Arc<CatalogCache>,
        view: ViewSender,
    ) -> Self {
        Self {
            sources,
            languages,
            tracker,
            cache,
            view,
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
        }
    }

    /// Override the coalescing window
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Start the actor on the current tokio runtime
    pub fn spawn(self) -> PipelineHandle {
        let cache = self.cache.clone();
        let view = self.view.clone();

        let task = tokio::spawn(async move {
            if let Err(e) = self.run().await {
                warn!("Catalog pipeline stopped: {}", e);
                view.catalog_failed(e);
            }
        });

        PipelineHandle { task, cache }
    }

    /// Run until every source has ended, a source fails, or the view goes away
    pub async fn run(self) -> Result<()> {
        let ReconciliationPipeline {
            sources,
            languages,
            tracker,
            cache,
            view,
            debounce,
        } = self;

        let mut installed = TrackedSource::new(SourceKind::Installed, sources.installed);
        let mut untrusted = TrackedSource::new(SourceKind::Untrusted, sources.untrusted);
        let mut available = TrackedSource::new(SourceKind::Available, sources.available);

        let mut latest = LatestSnapshots::new();
        let mut deadline: Option<Instant> = None;

        debug!(debounce_ms = debounce.as_millis() as u64, "Catalog pipeline started");

        loop {
            let (kind, next) = tokio::select! {
                next = installed.stream.next(), if installed.open => (installed.kind, next),
                next = untrusted.stream.next(), if untrusted.open => (untrusted.kind, next),
                next = available.stream.next(), if available.open => (available.kind, next),
                _ = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    deadline = None;
                    if let Some((inst, untr, avail)) = latest.ready() {
                        let catalog = Arc::new(merger::merge(
                            inst,
                            untr,
                            avail,
                            &tracker.snapshot(),
                            &languages.enabled_languages(),
                        ));
                        debug!(
                            groups = catalog.groups.len(),
                            items = catalog.len(),
                            "Recomputed extension catalog"
                        );
                        cache.store(catalog.clone());
                        if !view.catalog_changed(catalog) {
                            info!("Catalog view detached, stopping pipeline");
                            return Ok(());
                        }
                    }
                    continue;
                }
                else => break,
            };

            match next {
                Some(Ok(snapshot)) => {
                    debug!(
                        source = kind.name(),
                        count = snapshot.len(),
                        "Received catalog snapshot"
                    );
                    *latest.slot(kind) = Some(snapshot);
                    if latest.ready().is_some() {
                        deadline = Some(Instant::now() + debounce);
                    }
                }
                Some(Err(e)) => {
                    return Err(Error::source_failed(kind.name(), format!("{:#}", e)));
                }
                None => {
                    debug!(source = kind.name(), "Catalog source ended");
                    match kind {
                        SourceKind::Installed => installed.open = false,
                        SourceKind::Untrusted => untrusted.open = false,
                        SourceKind::Available => available.open = false,
                    }
                    if latest.slot(kind).is_none() {
                        return Err(Error::source_closed(kind.name()));
                    }
                }
            }
        }

        debug!("All catalog sources ended");
        Ok(())
    }
}

/// Running pipeline. Dropping the handle stops the actor.
#[derive(Debug)]
pub struct PipelineHandle {
    task: JoinHandle<()>,
    cache: Arc<CatalogCache>,
}

impl PipelineHandle {
    /// Last published catalog
    pub fn latest(&self) -> Option<Arc<extdeck_core::types::Catalog>> {
        self.cache.latest()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stop the actor, dropping its source subscriptions and pending timer
    pub fn shutdown(&self) {
        self.task.abort();
    }

    /// Wait for the actor to end on its own
    pub async fn join(mut self) {
        let _ = (&mut self.task).await;
    }
}

impl Drop for PipelineHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presenter::{presentation_channel, ViewUpdate};
    use crate::source::StaticLanguages;
    use futures::channel::mpsc;

    fn sources() -> (
        mpsc::UnboundedSender<anyhow::Result<Vec<ExtensionRecord>>>,
        mpsc::UnboundedSender<anyhow::Result<Vec<ExtensionRecord>>>,
        mpsc::UnboundedSender<anyhow::Result<Vec<ExtensionRecord>>>,
        CatalogSources,
    ) {
        let (itx, irx) = mpsc::unbounded();
        let (utx, urx) = mpsc::unbounded();
        let (atx, arx) = mpsc::unbounded();
        (
            itx,
            utx,
            atx,
            CatalogSources::new(irx.boxed(), urx.boxed(), arx.boxed()),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_merge_until_installed_and_untrusted_emit() {
        let (itx, utx, _atx, sources) = sources();
        let (view, mut presentation) = presentation_channel();
        let cache = Arc::new(CatalogCache::new());
        let handle = ReconciliationPipeline::new(
            sources,
            Arc::new(StaticLanguages::new(["en"])),
            Arc::new(InstallTracker::new()),
            cache.clone(),
            view,
        )
        .spawn();

        itx.unbounded_send(Ok(vec![ExtensionRecord::installed("a", "A")]))
            .unwrap();
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(handle.latest().is_none());

        utx.unbounded_send(Ok(vec![])).unwrap();
        match presentation.recv().await {
            Some(ViewUpdate::CatalogChanged(catalog)) => assert_eq!(catalog.len(), 1),
            other => panic!("unexpected update: {:?}", other),
        }
        assert!(cache.latest().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_source_closed_before_first_value() {
        let (itx, _utx, _atx, sources) = sources();
        let (view, _presentation) = presentation_channel();
        drop(itx);

        let result = ReconciliationPipeline::new(
            sources,
            Arc::new(StaticLanguages::default()),
            Arc::new(InstallTracker::new()),
            Arc::new(CatalogCache::new()),
            view,
        )
        .run()
        .await;

        assert!(matches!(result, Err(Error::SourceClosed { .. })));
    }
}
