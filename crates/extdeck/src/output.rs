//! Terminal output utilities

use console::style;
use extdeck_core::types::{Catalog, ExtensionKind, PresentationItem};
use tabled::{settings::Style, Table, Tabled};

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red().bold(), msg);
}

/// Print a warning message
pub fn warn(msg: &str) {
    eprintln!("{} {}", style("⚠").yellow().bold(), msg);
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}

/// Print a header
pub fn header(msg: &str) {
    println!("\n{}", style(msg).bold().underlined());
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("  {}: {}", style(key).dim(), value);
}

#[derive(Tabled)]
struct CatalogRow {
    package: String,
    name: String,
    version: String,
    status: String,
}

impl From<&PresentationItem> for CatalogRow {
    fn from(item: &PresentationItem) -> Self {
        let record = &item.record;
        Self {
            package: record.package_name.clone(),
            name: record.display_name.clone(),
            version: if record.version_name.is_empty() {
                "-".to_string()
            } else {
                record.version_name.clone()
            },
            status: item_status(item),
        }
    }
}

/// Short status text for one catalog row
pub fn item_status(item: &PresentationItem) -> String {
    if let Some(step) = item.install_step {
        return step.to_string();
    }
    match &item.record.kind {
        ExtensionKind::Installed {
            has_update: true, ..
        } => "update available".to_string(),
        ExtensionKind::Installed {
            is_obsolete: true, ..
        } => "obsolete".to_string(),
        ExtensionKind::Installed { .. } => "installed".to_string(),
        ExtensionKind::Untrusted { .. } => "untrusted".to_string(),
        ExtensionKind::Available => "available".to_string(),
    }
}

/// Print each group header followed by a table of its items
pub fn catalog(catalog: &Catalog) {
    for group in &catalog.groups {
        header(&group.header.to_string());
        let rows: Vec<CatalogRow> = group.items.iter().map(CatalogRow::from).collect();
        let mut table = Table::new(rows);
        table.with(Style::sharp());
        println!("{}", table);
    }
}
