//! Collaborator interfaces consumed by the catalog
//!
//! The catalog does not fetch, verify or install packages itself. Those
//! concerns live behind [`ExtensionManager`] and the three snapshot streams
//! in [`CatalogSources`].

use extdeck_core::types::{ExtensionRecord, InstallStep};
use futures::stream::BoxStream;
use std::collections::BTreeSet;
use std::sync::{Arc, PoisonError, RwLock};

/// Stream of full collection snapshots from one catalog source
pub type SnapshotStream = BoxStream<'static, anyhow::Result<Vec<ExtensionRecord>>>;

/// Stream of steps for one install or update, ending after a terminal step
pub type InstallStepStream = BoxStream<'static, InstallStep>;

/// The three independently updating extension collections
pub struct CatalogSources {
    pub installed: SnapshotStream,
    pub untrusted: SnapshotStream,
    pub available: SnapshotStream,
}

impl CatalogSources {
    pub fn new(
        installed: SnapshotStream,
        untrusted: SnapshotStream,
        available: SnapshotStream,
    ) -> Self {
        Self {
            installed,
            untrusted,
            available,
        }
    }
}

/// Package-management and trust-store collaborator
#[cfg_attr(test, mockall::automock)]
pub trait ExtensionManager: Send + Sync {
    /// Start installing an available extension
    fn install_extension(&self, extension: &ExtensionRecord) -> InstallStepStream;

    /// Start updating an installed extension
    fn update_extension(&self, extension: &ExtensionRecord) -> InstallStepStream;

    /// Request removal of an installed package
    fn uninstall_extension(&self, package_name: &str);

    /// Add a signature to the trust store
    fn trust_signature(&self, signature_hash: &str);

    /// Ask the available source to refetch the remote catalog
    fn find_available_extensions(&self);
}

/// Enabled language tags, read each time the catalog is merged
pub trait LanguageSource: Send + Sync {
    fn enabled_languages(&self) -> BTreeSet<String>;
}

/// Fixed set of languages
#[derive(Debug, Clone, Default)]
pub struct StaticLanguages(BTreeSet<String>);

impl StaticLanguages {
    pub fn new<I, S>(languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(languages.into_iter().map(Into::into).collect())
    }
}

impl LanguageSource for StaticLanguages {
    fn enabled_languages(&self) -> BTreeSet<String> {
        self.0.clone()
    }
}

/// Language preference that can change while the catalog is running
#[derive(Debug, Clone, Default)]
pub struct SharedLanguages {
    inner: Arc<RwLock<BTreeSet<String>>>,
}

impl SharedLanguages {
    pub fn new<I, S>(languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inner: Arc::new(RwLock::new(languages.into_iter().map(Into::into).collect())),
        }
    }

    /// Replace the enabled languages; applies from the next merge
    pub fn set<I, S>(&self, languages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = languages.into_iter().map(Into::into).collect();
    }
}

impl LanguageSource for SharedLanguages {
    fn enabled_languages(&self) -> BTreeSet<String> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
