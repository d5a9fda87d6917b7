//! Derived presentation types produced by a catalog merge

use super::extension_types::{ExtensionRecord, InstallStep};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Which section of the catalog a group belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupStatus {
    HasUpdate,
    Installed,
    NotInstalled,
}

/// Header of a catalog group
///
/// Identity is `(status, language)`. `size` is left out of equality and
/// hashing so a header stays the same key across recomputations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupHeader {
    pub status: GroupStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub size: usize,
}

impl GroupHeader {
    pub fn new(status: GroupStatus, language: Option<String>, size: usize) -> Self {
        Self {
            status,
            language,
            size,
        }
    }

    pub fn has_update(size: usize) -> Self {
        Self::new(GroupStatus::HasUpdate, None, size)
    }

    pub fn installed(size: usize) -> Self {
        Self::new(GroupStatus::Installed, None, size)
    }

    pub fn not_installed(language: Option<String>, size: usize) -> Self {
        Self::new(GroupStatus::NotInstalled, language, size)
    }

    /// Same identity, new size
    pub fn resized(&self, size: usize) -> Self {
        Self {
            status: self.status,
            language: self.language.clone(),
            size,
        }
    }

    /// Label shown before the item count
    pub fn label(&self) -> &str {
        match self.status {
            GroupStatus::HasUpdate => "Has update",
            GroupStatus::Installed => "Installed",
            GroupStatus::NotInstalled => self.language.as_deref().unwrap_or("Available"),
        }
    }
}

impl PartialEq for GroupHeader {
    fn eq(&self, other: &Self) -> bool {
        self.status == other.status && self.language == other.language
    }
}

impl Eq for GroupHeader {}

impl Hash for GroupHeader {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.status.hash(state);
        self.language.hash(state);
    }
}

impl fmt::Display for GroupHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.size)
    }
}

/// An extension placed in the catalog under its group header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentationItem {
    pub record: ExtensionRecord,
    pub header: GroupHeader,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub install_step: Option<InstallStep>,
}

impl PresentationItem {
    pub fn new(record: ExtensionRecord, header: GroupHeader) -> Self {
        Self {
            record,
            header,
            install_step: None,
        }
    }

    /// Package identity used to match progress updates
    pub fn package_name(&self) -> &str {
        &self.record.package_name
    }

    /// Copy of this item carrying a new install step
    pub fn with_step(&self, step: InstallStep) -> Self {
        Self {
            install_step: Some(step),
            ..self.clone()
        }
    }
}

/// A header and the items directly under it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogGroup {
    pub header: GroupHeader,
    pub items: Vec<PresentationItem>,
}

impl CatalogGroup {
    /// Build a group whose header size matches the items
    pub fn new(header: GroupHeader, records: Vec<ExtensionRecord>) -> Self {
        let header = header.resized(records.len());
        let items = records
            .into_iter()
            .map(|record| PresentationItem::new(record, header.clone()))
            .collect();
        Self { header, items }
    }
}

/// Flattened catalog row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogEntry {
    Header(GroupHeader),
    Item(PresentationItem),
}

/// Ordered, grouped catalog view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub groups: Vec<CatalogGroup>,
}

impl Catalog {
    pub fn new(groups: Vec<CatalogGroup>) -> Self {
        Self { groups }
    }

    /// Headers and items in display order
    pub fn entries(&self) -> Vec<CatalogEntry> {
        self.groups
            .iter()
            .flat_map(|group| {
                std::iter::once(CatalogEntry::Header(group.header.clone())).chain(
                    group
                        .items
                        .iter()
                        .map(|item| CatalogEntry::Item(item.clone())),
                )
            })
            .collect()
    }

    /// Items in display order, without headers
    pub fn items(&self) -> impl Iterator<Item = &PresentationItem> {
        self.groups.iter().flat_map(|group| group.items.iter())
    }

    /// Find the item for a package
    pub fn find(&self, package_name: &str) -> Option<&PresentationItem> {
        self.items().find(|item| item.package_name() == package_name)
    }

    pub fn headers(&self) -> impl Iterator<Item = &GroupHeader> {
        self.groups.iter().map(|group| &group.header)
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.groups.iter().map(|group| group.items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
