use querylog_domain::classification::{
    unknown_filter_label, CUSTOM_RULES_LABEL, REWRITE_APPLIED_LABEL,
};
use querylog_domain::log_entry::reason;
use querylog_domain::{
    ClassifiedEntry, Classification, ClientDirectory, FilterNameIndex, FilteringStatus,
    RawLogEntry, ReasonCategory, CUSTOM_RULES_FILTER_ID,
};
use std::sync::Arc;

use crate::ports::ServiceCatalogPort;

/// Maps raw log entries to their display classification.
///
/// Holds an immutable filter index and client directory; build a new
/// classifier when either changes.
pub struct LogEntryClassifier {
    filters: FilterNameIndex,
    clients: Arc<ClientDirectory>,
    services: Arc<dyn ServiceCatalogPort>,
}

impl LogEntryClassifier {
    pub fn new(filters: FilterNameIndex, services: Arc<dyn ServiceCatalogPort>) -> Self {
        Self {
            filters,
            clients: Arc::new(ClientDirectory::default()),
            services,
        }
    }

    pub fn from_status(status: &FilteringStatus, services: Arc<dyn ServiceCatalogPort>) -> Self {
        Self::new(status.filter_index(), services)
    }

    pub fn with_clients(mut self, clients: Arc<ClientDirectory>) -> Self {
        self.clients = clients;
        self
    }

    pub fn classify(&self, entry: &RawLogEntry) -> ClassifiedEntry {
        let category = ReasonCategory::from_reason(&entry.reason);
        let filter_key = entry
            .reason
            .strip_prefix(reason::FILTERED_PREFIX)
            .map(str::to_string);
        let is_rewrite = entry.reason == reason::REWRITE;

        let classification = match category {
            ReasonCategory::Normal => Classification::Normal,
            ReasonCategory::Rewritten => Classification::Rewritten,
            ReasonCategory::Filtered => Classification::Filtered {
                filter_name: self.filter_name(entry.filter_id),
            },
            ReasonCategory::Whitelisted => Classification::Whitelisted {
                filter_name: self.filter_name(entry.filter_id),
            },
            ReasonCategory::BlockedService => Classification::BlockedService {
                service_name: self.service_name(entry.service_name.as_deref()),
            },
        };

        let display_rule = match &classification {
            Classification::BlockedService { service_name } => service_name.clone(),
            _ => entry.rule.clone(),
        };

        let annotation = match (&classification, &filter_key) {
            (
                Classification::Filtered { .. } | Classification::BlockedService { .. },
                Some(key),
            ) => Some(format!("Filtered by {}", key)),
            _ if is_rewrite => Some(REWRITE_APPLIED_LABEL.to_string()),
            _ => None,
        };

        let row_tag = classification.row_tag();
        let client_name = self.clients.name_of(&entry.client).map(str::to_string);

        ClassifiedEntry {
            entry: entry.clone(),
            classification,
            is_rewrite,
            filter_key,
            display_rule,
            client_name,
            annotation,
            row_tag,
        }
    }

    pub fn classify_all(&self, entries: &[RawLogEntry]) -> Vec<ClassifiedEntry> {
        entries.iter().map(|entry| self.classify(entry)).collect()
    }

    fn filter_name(&self, filter_id: i64) -> String {
        if filter_id == CUSTOM_RULES_FILTER_ID {
            return CUSTOM_RULES_LABEL.to_string();
        }

        match self.filters.name_of(filter_id) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => unknown_filter_label(filter_id),
        }
    }

    fn service_name(&self, service_id: Option<&str>) -> String {
        service_id
            .and_then(|id| self.services.get_by_id(id))
            .map(|service| service.name.to_string())
            .unwrap_or_default()
    }
}
