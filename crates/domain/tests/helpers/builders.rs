#![allow(dead_code)]
use chrono::{DateTime, TimeZone, Utc};
use querylog_domain::log_entry::reason;
use querylog_domain::RawLogEntry;

pub fn ts(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

pub struct LogEntryBuilder {
    timestamp: DateTime<Utc>,
    domain: String,
    query_type: String,
    responses: Vec<String>,
    client: String,
    reason: String,
    filter_id: i64,
    rule: String,
    status: String,
    service_name: Option<String>,
}

impl LogEntryBuilder {
    pub fn new() -> Self {
        Self {
            timestamp: ts(0),
            domain: "example.com".to_string(),
            query_type: "A".to_string(),
            responses: vec!["93.184.216.34".to_string()],
            client: "192.168.1.100".to_string(),
            reason: reason::NOT_FILTERED_NOT_FOUND.to_string(),
            filter_id: 0,
            rule: String::new(),
            status: "NOERROR".to_string(),
            service_name: None,
        }
    }

    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn domain(mut self, domain: &str) -> Self {
        self.domain = domain.to_string();
        self
    }

    pub fn client(mut self, client: &str) -> Self {
        self.client = client.to_string();
        self
    }

    pub fn reason(mut self, reason: &str) -> Self {
        self.reason = reason.to_string();
        self
    }

    pub fn filter_id(mut self, filter_id: i64) -> Self {
        self.filter_id = filter_id;
        self
    }

    pub fn rule(mut self, rule: &str) -> Self {
        self.rule = rule.to_string();
        self
    }

    pub fn service_name(mut self, service_name: &str) -> Self {
        self.service_name = Some(service_name.to_string());
        self
    }

    pub fn no_responses(mut self) -> Self {
        self.responses.clear();
        self
    }

    pub fn build(self) -> RawLogEntry {
        RawLogEntry {
            timestamp: self.timestamp,
            domain: self.domain,
            query_type: self.query_type,
            responses: self.responses,
            client: self.client,
            reason: self.reason,
            filter_id: self.filter_id,
            rule: self.rule,
            status: self.status,
            service_name: self.service_name,
        }
    }
}

impl Default for LogEntryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
