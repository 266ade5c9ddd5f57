use chrono::{DateTime, Utc};
use querylog_domain::{
    ClientRecord, FilterCatalogEntry, FilteringStatus, LogsConfig, RawLogEntry, RuleSet,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(super) struct QueryLogResponse {
    #[serde(default)]
    pub data: Vec<WireLogEntry>,
    /// Empty string when the server has no entries.
    #[serde(default)]
    pub oldest: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct WireLogEntry {
    time: DateTime<Utc>,
    question: WireQuestion,
    #[serde(default)]
    answer: Vec<WireAnswer>,
    #[serde(default)]
    client: String,
    #[serde(default)]
    reason: String,
    #[serde(default, rename = "filterId")]
    filter_id: i64,
    #[serde(default)]
    rule: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    service_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireQuestion {
    host: String,
    #[serde(rename = "type", default)]
    qtype: String,
}

#[derive(Debug, Deserialize)]
struct WireAnswer {
    value: serde_json::Value,
}

impl WireAnswer {
    fn into_text(self) -> String {
        match self.value {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        }
    }
}

impl From<WireLogEntry> for RawLogEntry {
    fn from(wire: WireLogEntry) -> Self {
        Self {
            timestamp: wire.time,
            domain: wire.question.host,
            query_type: wire.question.qtype,
            responses: wire.answer.into_iter().map(WireAnswer::into_text).collect(),
            client: wire.client,
            reason: wire.reason,
            filter_id: wire.filter_id,
            rule: wire.rule,
            status: wire.status,
            service_name: wire.service_name.filter(|s| !s.is_empty()),
        }
    }
}

/// Parses the `oldest` marker; empty means no cursor.
pub(super) fn parse_oldest(oldest: &str) -> Result<Option<DateTime<Utc>>, chrono::ParseError> {
    if oldest.is_empty() {
        return Ok(None);
    }
    DateTime::parse_from_rfc3339(oldest).map(|ts| Some(ts.with_timezone(&Utc)))
}

#[derive(Debug, Deserialize)]
pub(super) struct QueryLogInfoResponse {
    #[serde(default)]
    enabled: bool,
    #[serde(default = "default_interval")]
    interval: u32,
}

fn default_interval() -> u32 {
    1
}

impl From<QueryLogInfoResponse> for LogsConfig {
    fn from(wire: QueryLogInfoResponse) -> Self {
        Self {
            enabled: wire.enabled,
            interval_days: wire.interval,
        }
    }
}

/// `user_rules` arrives either as one text blob or as a list of lines.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireUserRules {
    Text(String),
    Lines(Vec<String>),
}

#[derive(Debug, Deserialize)]
pub(super) struct FilteringStatusResponse {
    #[serde(default)]
    enabled: bool,
    #[serde(default)]
    filters: Option<Vec<FilterCatalogEntry>>,
    #[serde(default)]
    user_rules: Option<WireUserRules>,
}

impl From<FilteringStatusResponse> for FilteringStatus {
    fn from(wire: FilteringStatusResponse) -> Self {
        let user_rules = match wire.user_rules {
            Some(WireUserRules::Text(text)) => RuleSet::new(text),
            Some(WireUserRules::Lines(lines)) => RuleSet::from_lines(lines),
            None => RuleSet::default(),
        };

        Self {
            enabled: wire.enabled,
            user_rules,
            filters: wire.filters.unwrap_or_default(),
            processing_rules: false,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ClientsResponse {
    #[serde(default)]
    clients: Option<Vec<WireClient>>,
    #[serde(default)]
    auto_clients: Option<Vec<WireAutoClient>>,
}

#[derive(Debug, Deserialize)]
struct WireClient {
    name: String,
    #[serde(default)]
    ids: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct WireAutoClient {
    ip: String,
    #[serde(default)]
    name: String,
}

impl ClientsResponse {
    pub fn into_records(self) -> Vec<ClientRecord> {
        let persistent = self
            .clients
            .unwrap_or_default()
            .into_iter()
            .map(|c| ClientRecord::persistent(c.name, c.ids));
        let auto = self
            .auto_clients
            .unwrap_or_default()
            .into_iter()
            .map(|c| ClientRecord::auto(c.name, c.ip));
        persistent.chain(auto).collect()
    }
}
