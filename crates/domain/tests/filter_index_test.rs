use querylog_domain::{FilterCatalogEntry, FilterNameIndex, FilteringStatus, RuleSet};

#[test]
fn test_index_resolves_names_by_id() {
    let index = FilterNameIndex::build(&[
        FilterCatalogEntry::new(1, "AdGuard DNS filter"),
        FilterCatalogEntry::new(7, "AdAway Default Blocklist"),
    ]);

    assert_eq!(index.len(), 2);
    assert_eq!(index.name_of(1), Some("AdGuard DNS filter"));
    assert_eq!(index.name_of(7), Some("AdAway Default Blocklist"));
    assert_eq!(index.name_of(3), None);
}

#[test]
fn test_index_keeps_first_entry_for_duplicate_ids() {
    let index = FilterNameIndex::build(&[
        FilterCatalogEntry::new(1, "first"),
        FilterCatalogEntry::new(1, "second"),
    ]);

    assert_eq!(index.len(), 1);
    assert_eq!(index.name_of(1), Some("first"));
}

#[test]
fn test_empty_catalog() {
    let index = FilterNameIndex::build(&[]);
    assert!(index.is_empty());
    assert_eq!(index.name_of(0), None);
}

#[test]
fn test_filtering_status_builds_index() {
    let status = FilteringStatus {
        enabled: true,
        user_rules: RuleSet::new("||a.com^\n"),
        filters: vec![FilterCatalogEntry::new(2, "list two")],
        processing_rules: false,
    };

    assert_eq!(status.filter_index().name_of(2), Some("list two"));
}
