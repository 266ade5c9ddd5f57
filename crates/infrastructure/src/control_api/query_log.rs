use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use querylog_application::ports::QueryLogSource;
use querylog_domain::{DomainError, LogPage, LogsConfig, RawLogEntry};
use tracing::debug;

use super::wire::{parse_oldest, QueryLogInfoResponse, QueryLogResponse};
use super::ControlApiClient;

const QUERYLOG_PATH: &str = "/control/querylog";
const QUERYLOG_INFO_PATH: &str = "/control/querylog_info";

#[async_trait]
impl QueryLogSource for ControlApiClient {
    async fn fetch_logs(
        &self,
        older_than: Option<DateTime<Utc>>,
        page: u32,
        page_size: u32,
    ) -> Result<LogPage, DomainError> {
        let query: Vec<(&str, String)> = older_than
            .map(|ts| {
                (
                    "older_than",
                    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true),
                )
            })
            .into_iter()
            .collect();

        let response: QueryLogResponse = self
            .get_json(QUERYLOG_PATH, &query, DomainError::FetchFailed)
            .await?;

        let oldest = parse_oldest(&response.oldest).map_err(|e| {
            DomainError::InvalidResponse(format!("oldest {:?}: {}", response.oldest, e))
        })?;

        let entries: Vec<RawLogEntry> = response.data.into_iter().map(RawLogEntry::from).collect();

        debug!(
            page,
            page_size,
            entries = entries.len(),
            oldest = ?oldest,
            "Query log fetched"
        );

        Ok(LogPage { entries, oldest })
    }

    async fn fetch_logs_config(&self) -> Result<LogsConfig, DomainError> {
        let response: QueryLogInfoResponse = self
            .get_json(QUERYLOG_INFO_PATH, &[], DomainError::FetchFailed)
            .await?;
        Ok(response.into())
    }
}
