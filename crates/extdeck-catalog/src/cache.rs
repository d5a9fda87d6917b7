//! Last published catalog
//!
//! Written only by the reconciliation pipeline. The dispatcher reads it to
//! place progress updates and to filter without re-merging.

use extdeck_core::types::Catalog;
use std::sync::{Arc, PoisonError, RwLock};

#[derive(Debug, Default)]
pub struct CatalogCache {
    latest: RwLock<Option<Arc<Catalog>>>,
}

impl CatalogCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cached catalog
    pub fn store(&self, catalog: Arc<Catalog>) {
        *self.latest.write().unwrap_or_else(PoisonError::into_inner) = Some(catalog);
    }

    /// Last published catalog, if any merge has completed
    pub fn latest(&self) -> Option<Arc<Catalog>> {
        self.latest
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
