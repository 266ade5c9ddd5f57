use async_trait::async_trait;
use querylog_application::ports::FilteringRepository;
use querylog_domain::{DomainError, FilteringStatus, RuleSet};
use tracing::info;

use super::wire::FilteringStatusResponse;
use super::ControlApiClient;

const STATUS_PATH: &str = "/control/filtering/status";
const SET_RULES_PATH: &str = "/control/filtering/set_rules";

#[async_trait]
impl FilteringRepository for ControlApiClient {
    async fn fetch_filtering_status(&self) -> Result<FilteringStatus, DomainError> {
        let response: FilteringStatusResponse = self
            .get_json(STATUS_PATH, &[], DomainError::FilteringStatusUnavailable)
            .await?;
        Ok(response.into())
    }

    async fn persist_rules(&self, rules: &RuleSet) -> Result<(), DomainError> {
        self.post_text(
            SET_RULES_PATH,
            rules.as_str().to_string(),
            DomainError::PersistFailed,
        )
        .await?;

        info!(lines = rules.lines().count(), "User rules saved");
        Ok(())
    }
}
