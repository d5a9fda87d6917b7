//! Extension catalog reconciliation for extdeck
//!
//! This crate handles:
//! - Merging installed, untrusted and available extensions into a grouped catalog
//! - Debounced reconciliation of the three catalog sources
//! - Install/update progress tracking per package
//! - Install, update, uninstall and trust operations
//! - Handing catalog snapshots to a single presentation task

pub mod cache;
pub mod dispatcher;
pub mod engine;
pub mod merger;
pub mod pipeline;
pub mod presenter;
pub mod source;
pub mod tracker;

pub use cache::CatalogCache;
pub use dispatcher::{InstallHandle, OperationDispatcher};
pub use engine::CatalogEngine;
pub use merger::{filter, merge};
pub use pipeline::{PipelineHandle, ReconciliationPipeline};
pub use presenter::{presentation_channel, CatalogView, PresentationLoop, ViewSender, ViewUpdate};
pub use source::{
    CatalogSources, ExtensionManager, InstallStepStream, LanguageSource, SharedLanguages,
    SnapshotStream, StaticLanguages,
};
pub use tracker::{InstallTracker, TrackerGuard};
