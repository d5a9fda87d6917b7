//! Builders for catalog test fixtures

use extdeck_core::types::{Catalog, ExtensionRecord, GroupStatus};
use std::collections::BTreeSet;

pub fn installed(package: &str) -> ExtensionRecord {
    ExtensionRecord::installed(package, display_name(package)).with_version("1.0.0")
}

pub fn installed_with_update(package: &str) -> ExtensionRecord {
    installed(package).with_update(true)
}

pub fn untrusted(package: &str) -> ExtensionRecord {
    ExtensionRecord::untrusted(package, display_name(package), format!("sig-{}", package))
}

pub fn available(package: &str, language: &str) -> ExtensionRecord {
    ExtensionRecord::available(package, display_name(package), language).with_version("1.1.0")
}

/// "eu.ext.alpha" -> "Alpha"
pub fn display_name(package: &str) -> String {
    let last = package.rsplit('.').next().unwrap_or(package);
    let mut chars = last.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn langs(tags: &[&str]) -> BTreeSet<String> {
    tags.iter().map(|tag| tag.to_string()).collect()
}

/// (status, language, size) for every header, in order
pub fn header_summary(catalog: &Catalog) -> Vec<(GroupStatus, Option<String>, usize)> {
    catalog
        .headers()
        .map(|h| (h.status, h.language.clone(), h.size))
        .collect()
}

pub fn package_names(catalog: &Catalog) -> Vec<String> {
    catalog
        .items()
        .map(|item| item.package_name().to_string())
        .collect()
}
