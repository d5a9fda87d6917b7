//! Catalog merge and filter policy
//!
//! Combines the installed, untrusted and available collections into one
//! grouped [`Catalog`]:
//! 1. Installed extensions with a pending update
//! 2. Installed and untrusted extensions
//! 3. Available extensions, one group per language
//!
//! Every group is sorted by package name so repeated merges of the same
//! inputs produce identical output.

use extdeck_core::types::{
    Catalog, CatalogGroup, ExtensionRecord, GroupHeader, InstallStep, PresentationItem,
};
use std::collections::{BTreeSet, HashMap, HashSet};

/// Merge the three collections into an ordered, grouped catalog
///
/// `progress` annotates available items with their in-flight install step.
/// Available extensions are listed only when their language is in
/// `active_languages` or is `"all"`.
pub fn merge(
    installed: &[ExtensionRecord],
    untrusted: &[ExtensionRecord],
    available: &[ExtensionRecord],
    progress: &HashMap<String, InstallStep>,
    active_languages: &BTreeSet<String>,
) -> Catalog {
    let (mut updates, mut current): (Vec<_>, Vec<_>) =
        installed.iter().cloned().partition(|ext| ext.has_update());

    updates.sort_by(|a, b| a.package_name.cmp(&b.package_name));
    current.sort_by(|a, b| {
        a.is_obsolete()
            .cmp(&b.is_obsolete())
            .then_with(|| a.package_name.cmp(&b.package_name))
    });

    let mut untrusted_sorted = untrusted.to_vec();
    untrusted_sorted.sort_by(|a, b| a.package_name.cmp(&b.package_name));

    let known: HashSet<&str> = installed
        .iter()
        .chain(untrusted)
        .map(|ext| ext.package_name.as_str())
        .collect();

    let mut available_sorted: Vec<ExtensionRecord> = available
        .iter()
        .filter(|ext| !known.contains(ext.package_name.as_str()))
        .filter(|ext| ext.matches_languages(active_languages.iter().map(String::as_str)))
        .cloned()
        .collect();
    available_sorted.sort_by(|a, b| a.package_name.cmp(&b.package_name));

    let mut groups = Vec::new();

    if !updates.is_empty() {
        groups.push(CatalogGroup::new(GroupHeader::has_update(0), updates));
    }

    if !current.is_empty() || !untrusted_sorted.is_empty() {
        current.extend(untrusted_sorted);
        groups.push(CatalogGroup::new(GroupHeader::installed(0), current));
    }

    for (language, records) in group_by_language(available_sorted) {
        let mut group = CatalogGroup::new(GroupHeader::not_installed(language, 0), records);
        for item in &mut group.items {
            item.install_step = progress.get(item.package_name()).copied();
        }
        groups.push(group);
    }

    Catalog::new(groups)
}

/// Group records by language, keeping the order languages first appear in
fn group_by_language(records: Vec<ExtensionRecord>) -> Vec<(Option<String>, Vec<ExtensionRecord>)> {
    let mut index: HashMap<Option<String>, usize> = HashMap::new();
    let mut grouped: Vec<(Option<String>, Vec<ExtensionRecord>)> = Vec::new();

    for record in records {
        match index.get(&record.language) {
            Some(&pos) => grouped[pos].1.push(record),
            None => {
                index.insert(record.language.clone(), grouped.len());
                grouped.push((record.language.clone(), vec![record]));
            }
        }
    }

    grouped
}

/// Keep the items whose display name contains `query`, ignoring case
///
/// Headers are rebuilt with the post-filter item count and groups left
/// without items are dropped. The input catalog is not modified.
pub fn filter(catalog: &Catalog, query: &str) -> Catalog {
    let needle = query.to_lowercase();

    let groups = catalog
        .groups
        .iter()
        .filter_map(|group| {
            let matching: Vec<&PresentationItem> = group
                .items
                .iter()
                .filter(|item| item.record.display_name.to_lowercase().contains(&needle))
                .collect();

            if matching.is_empty() {
                return None;
            }

            let header = group.header.resized(matching.len());
            let items = matching
                .into_iter()
                .map(|item| PresentationItem {
                    header: header.clone(),
                    ..item.clone()
                })
                .collect();

            Some(CatalogGroup { header, items })
        })
        .collect();

    Catalog::new(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use extdeck_core::types::{CatalogEntry, GroupStatus};
    use test_case::test_case;

    fn langs(tags: &[&str]) -> BTreeSet<String> {
        tags.iter().map(|t| t.to_string()).collect()
    }

    fn package_names(catalog: &Catalog) -> Vec<&str> {
        catalog.items().map(|item| item.package_name()).collect()
    }

    #[test]
    fn test_installed_and_available_scenario() {
        let installed = vec![ExtensionRecord::installed("a", "A")];
        let available = vec![ExtensionRecord::available("b", "B", "en")];

        let catalog = merge(&installed, &[], &available, &HashMap::new(), &langs(&["en"]));
        let entries = catalog.entries();

        assert_eq!(entries.len(), 4);
        match &entries[0] {
            CatalogEntry::Header(h) => {
                assert_eq!(h.status, GroupStatus::Installed);
                assert_eq!(h.size, 1);
            }
            other => panic!("expected header, got {:?}", other),
        }
        assert!(matches!(&entries[1], CatalogEntry::Item(i) if i.package_name() == "a"));
        match &entries[2] {
            CatalogEntry::Header(h) => {
                assert_eq!(h.status, GroupStatus::NotInstalled);
                assert_eq!(h.language.as_deref(), Some("en"));
                assert_eq!(h.size, 1);
            }
            other => panic!("expected header, got {:?}", other),
        }
        assert!(matches!(&entries[3], CatalogEntry::Item(i) if i.package_name() == "b"));
    }

    #[test]
    fn test_inactive_language_filtered_out() {
        let available = vec![ExtensionRecord::available("b", "B", "fr")];
        let catalog = merge(&[], &[], &available, &HashMap::new(), &langs(&["en"]));
        assert!(catalog.entries().is_empty());
    }

    #[test]
    fn test_update_only_has_no_installed_group() {
        let installed = vec![ExtensionRecord::installed("a", "A").with_update(true)];
        let catalog = merge(&installed, &[], &[], &HashMap::new(), &langs(&["en"]));

        assert_eq!(catalog.groups.len(), 1);
        assert_eq!(catalog.groups[0].header.status, GroupStatus::HasUpdate);
        assert_eq!(catalog.groups[0].header.size, 1);
    }

    #[test]
    fn test_installed_sort_puts_obsolete_last() {
        let installed = vec![
            ExtensionRecord::installed("c", "C"),
            ExtensionRecord::installed("a", "A").with_obsolete(true),
            ExtensionRecord::installed("b", "B"),
        ];
        let catalog = merge(&installed, &[], &[], &HashMap::new(), &langs(&[]));
        assert_eq!(package_names(&catalog), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_untrusted_follow_installed_in_same_group() {
        let installed = vec![ExtensionRecord::installed("z", "Z")];
        let untrusted = vec![
            ExtensionRecord::untrusted("m", "M", "h1"),
            ExtensionRecord::untrusted("b", "B", "h2"),
        ];
        let catalog = merge(&installed, &untrusted, &[], &HashMap::new(), &langs(&[]));

        assert_eq!(catalog.groups.len(), 1);
        assert_eq!(catalog.groups[0].header.size, 3);
        assert_eq!(package_names(&catalog), vec!["z", "b", "m"]);
    }

    #[test]
    fn test_available_excludes_installed_and_untrusted() {
        let installed = vec![ExtensionRecord::installed("a", "A")];
        let untrusted = vec![ExtensionRecord::untrusted("b", "B", "h")];
        let available = vec![
            ExtensionRecord::available("a", "A", "en"),
            ExtensionRecord::available("b", "B", "en"),
            ExtensionRecord::available("c", "C", "en"),
        ];
        let catalog = merge(&installed, &untrusted, &available, &HashMap::new(), &langs(&["en"]));

        let not_installed: Vec<&str> = catalog
            .groups
            .iter()
            .filter(|g| g.header.status == GroupStatus::NotInstalled)
            .flat_map(|g| g.items.iter().map(|i| i.package_name()))
            .collect();
        assert_eq!(not_installed, vec!["c"]);
    }

    #[test]
    fn test_language_groups_in_first_encountered_order() {
        let available = vec![
            ExtensionRecord::available("d.en", "D", "en"),
            ExtensionRecord::available("a.fr", "A", "fr"),
            ExtensionRecord::available("b.all", "B", "all"),
            ExtensionRecord::available("c.fr", "C", "fr"),
        ];
        let catalog = merge(&[], &[], &available, &HashMap::new(), &langs(&["en", "fr"]));

        let languages: Vec<Option<&str>> = catalog
            .headers()
            .map(|h| h.language.as_deref())
            .collect();
        assert_eq!(languages, vec![Some("fr"), Some("all"), Some("en")]);
        assert_eq!(catalog.groups[0].header.size, 2);
    }

    #[test]
    fn test_progress_annotates_available_items() {
        let available = vec![
            ExtensionRecord::available("a", "A", "en"),
            ExtensionRecord::available("b", "B", "en"),
        ];
        let progress = HashMap::from([("b".to_string(), InstallStep::Downloading)]);
        let catalog = merge(&[], &[], &available, &progress, &langs(&["en"]));

        assert_eq!(catalog.find("a").unwrap().install_step, None);
        assert_eq!(
            catalog.find("b").unwrap().install_step,
            Some(InstallStep::Downloading)
        );
    }

    #[test_case("", 3 ; "empty query keeps everything")]
    #[test_case("ALPHA", 1 ; "case insensitive")]
    #[test_case("ta", 2 ; "substring across groups")]
    #[test_case("zzz", 0 ; "no match")]
    fn test_filter_counts(query: &str, expected: usize) {
        let installed = vec![ExtensionRecord::installed("a", "Alpha")];
        let available = vec![
            ExtensionRecord::available("b", "Beta", "en"),
            ExtensionRecord::available("c", "Delta", "en"),
        ];
        let catalog = merge(&installed, &[], &available, &HashMap::new(), &langs(&["en"]));

        let filtered = filter(&catalog, query);
        assert_eq!(filtered.len(), expected);
        for group in &filtered.groups {
            assert_eq!(group.header.size, group.items.len());
            assert!(group.items.iter().all(|i| i.header.size == group.items.len()));
        }
    }

    #[test]
    fn test_filter_leaves_source_catalog_untouched() {
        let available = vec![
            ExtensionRecord::available("b", "Beta", "en"),
            ExtensionRecord::available("c", "Gamma", "en"),
        ];
        let catalog = merge(&[], &[], &available, &HashMap::new(), &langs(&["en"]));

        let filtered = filter(&catalog, "gam");
        assert_eq!(filtered.groups[0].header.size, 1);
        assert_eq!(catalog.groups[0].header.size, 2);
    }
}
