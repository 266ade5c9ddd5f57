use crate::user_rules::RuleSet;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Filter id reserved for the user's own custom rules.
pub const CUSTOM_RULES_FILTER_ID: i64 = 0;

/// A subscribed filter list as reported by the filtering status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCatalogEntry {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub rules_count: u64,
}

fn default_enabled() -> bool {
    true
}

impl FilterCatalogEntry {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            url: None,
            enabled: true,
            rules_count: 0,
        }
    }
}

/// `id -> name` index, built once per filter catalog update.
#[derive(Debug, Clone, Default)]
pub struct FilterNameIndex {
    by_id: FxHashMap<i64, Arc<str>>,
}

impl FilterNameIndex {
    pub fn build(filters: &[FilterCatalogEntry]) -> Self {
        let mut by_id = FxHashMap::with_capacity_and_hasher(filters.len(), Default::default());
        for filter in filters {
            // First entry wins when the catalog repeats an id.
            by_id
                .entry(filter.id)
                .or_insert_with(|| Arc::from(filter.name.as_str()));
        }
        Self { by_id }
    }

    pub fn name_of(&self, id: i64) -> Option<&str> {
        self.by_id.get(&id).map(|name| name.as_ref())
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// Snapshot of the filtering configuration relevant to the query log view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteringStatus {
    pub enabled: bool,
    pub user_rules: RuleSet,
    pub filters: Vec<FilterCatalogEntry>,
    pub processing_rules: bool,
}

impl FilteringStatus {
    pub fn filter_index(&self) -> FilterNameIndex {
        FilterNameIndex::build(&self.filters)
    }
}
