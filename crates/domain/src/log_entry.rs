use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reason strings reported by the filtering engine for a logged query.
pub mod reason {
    pub const FILTERED_PREFIX: &str = "Filtered";
    pub const FILTERED_BLOCKED_SERVICE: &str = "FilteredBlockedService";
    pub const REWRITE: &str = "Rewrite";
    pub const NOT_FILTERED_WHITE_LIST: &str = "NotFilteredWhiteList";
    pub const NOT_FILTERED_NOT_FOUND: &str = "NotFilteredNotFound";
}

/// One query log row as delivered by the log source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLogEntry {
    pub timestamp: DateTime<Utc>,
    pub domain: String,
    pub query_type: String,
    #[serde(default)]
    pub responses: Vec<String>,
    pub client: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub filter_id: i64,
    #[serde(default)]
    pub rule: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub service_name: Option<String>,
}

impl RawLogEntry {
    pub fn new(timestamp: DateTime<Utc>, domain: impl Into<String>) -> Self {
        Self {
            timestamp,
            domain: domain.into(),
            query_type: "A".to_string(),
            responses: Vec::new(),
            client: String::new(),
            reason: reason::NOT_FILTERED_NOT_FOUND.to_string(),
            filter_id: 0,
            rule: String::new(),
            status: "NOERROR".to_string(),
            service_name: None,
        }
    }

    pub fn has_responses(&self) -> bool {
        !self.responses.is_empty()
    }
}
