use async_trait::async_trait;
use chrono::{DateTime, Utc};
use querylog_domain::{DomainError, LogPage, LogsConfig};

#[async_trait]
pub trait QueryLogSource: Send + Sync {
    /// Fetches entries strictly older than `older_than`; `None` asks for the
    /// newest entries.
    async fn fetch_logs(
        &self,
        older_than: Option<DateTime<Utc>>,
        page: u32,
        page_size: u32,
    ) -> Result<LogPage, DomainError>;

    async fn fetch_logs_config(&self) -> Result<LogsConfig, DomainError>;
}
