use async_trait::async_trait;
use querylog_domain::{DomainError, FilteringStatus, RuleSet};

#[async_trait]
pub trait FilteringRepository: Send + Sync {
    async fn fetch_filtering_status(&self) -> Result<FilteringStatus, DomainError>;

    async fn persist_rules(&self, rules: &RuleSet) -> Result<(), DomainError>;
}
