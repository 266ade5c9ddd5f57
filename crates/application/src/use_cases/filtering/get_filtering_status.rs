use crate::ports::FilteringRepository;
use querylog_domain::{DomainError, FilteringStatus};
use std::sync::Arc;

pub struct GetFilteringStatusUseCase {
    repository: Arc<dyn FilteringRepository>,
}

impl GetFilteringStatusUseCase {
    pub fn new(repository: Arc<dyn FilteringRepository>) -> Self {
        Self { repository }
    }

    pub async fn execute(&self) -> Result<FilteringStatus, DomainError> {
        self.repository.fetch_filtering_status().await
    }
}
