//! Hand-off of catalog updates to the presentation task
//!
//! Merging and install tracking run on worker tasks. Views are single-writer,
//! so every update goes through one channel and is applied to the view by a
//! single [`PresentationLoop`].

use extdeck_core::types::{Catalog, PresentationItem};
use extdeck_core::Error;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

/// Receiver of catalog updates
pub trait CatalogView {
    /// Replace the whole list
    fn on_catalog_changed(&mut self, catalog: Arc<Catalog>);

    /// Patch the item with the same package name, if shown
    fn on_item_progress_changed(&mut self, item: PresentationItem);

    /// The catalog stopped updating. The last list stays valid.
    fn on_catalog_failed(&mut self, error: &Error) {
        let _ = error;
    }
}

/// One update queued for the view
#[derive(Debug, Clone)]
pub enum ViewUpdate {
    CatalogChanged(Arc<Catalog>),
    ItemProgressChanged(PresentationItem),
    CatalogFailed(Arc<Error>),
}

impl ViewUpdate {
    /// Deliver this update to `view`
    pub fn apply_to<V: CatalogView + ?Sized>(self, view: &mut V) {
        match self {
            ViewUpdate::CatalogChanged(catalog) => view.on_catalog_changed(catalog),
            ViewUpdate::ItemProgressChanged(item) => view.on_item_progress_changed(item),
            ViewUpdate::CatalogFailed(error) => view.on_catalog_failed(&error),
        }
    }
}

/// Sending half of the presentation channel
#[derive(Debug, Clone)]
pub struct ViewSender {
    tx: mpsc::UnboundedSender<ViewUpdate>,
}

impl ViewSender {
    /// Queue a full catalog. Returns false once the presentation loop is gone.
    pub fn catalog_changed(&self, catalog: Arc<Catalog>) -> bool {
        self.send(ViewUpdate::CatalogChanged(catalog))
    }

    pub fn item_progress_changed(&self, item: PresentationItem) -> bool {
        self.send(ViewUpdate::ItemProgressChanged(item))
    }

    pub fn catalog_failed(&self, error: Error) -> bool {
        self.send(ViewUpdate::CatalogFailed(Arc::new(error)))
    }

    fn send(&self, update: ViewUpdate) -> bool {
        if self.tx.send(update).is_err() {
            debug!("Presentation loop closed, dropping view update");
            return false;
        }
        true
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Receiving half, owned by the presentation task
#[derive(Debug)]
pub struct PresentationLoop {
    rx: mpsc::UnboundedReceiver<ViewUpdate>,
}

/// Create a connected sender and presentation loop
pub fn presentation_channel() -> (ViewSender, PresentationLoop) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ViewSender { tx }, PresentationLoop { rx })
}

impl PresentationLoop {
    /// Next queued update, or None once every sender is dropped
    pub async fn recv(&mut self) -> Option<ViewUpdate> {
        self.rx.recv().await
    }

    /// Queued update, if any, without waiting
    pub fn try_recv(&mut self) -> Option<ViewUpdate> {
        self.rx.try_recv().ok()
    }

    /// Apply updates to the view until every sender is dropped
    pub async fn run<V: CatalogView + ?Sized>(mut self, view: &mut V) {
        while let Some(update) = self.rx.recv().await {
            update.apply_to(view);
        }
    }

    /// Apply every update queued right now without waiting
    ///
    /// For hosts that own a frame loop and poll between frames.
    pub fn drain<V: CatalogView + ?Sized>(&mut self, view: &mut V) -> usize {
        let mut applied = 0;
        while let Some(update) = self.try_recv() {
            update.apply_to(view);
            applied += 1;
        }
        applied
    }
}
