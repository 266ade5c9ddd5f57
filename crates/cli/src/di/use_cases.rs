use super::Adapters;
use querylog_application::use_cases::{
    GetFilteringStatusUseCase, LogViewSession, ToggleBlockingUseCase,
};
use querylog_domain::{Config, DomainError};
use std::sync::Arc;

pub struct UseCases {
    pub toggle_blocking: Arc<ToggleBlockingUseCase>,
    pub get_filtering_status: Arc<GetFilteringStatusUseCase>,
    pub log_view: Arc<LogViewSession>,
}

impl UseCases {
    pub fn new(adapters: &Adapters, config: &Config) -> Result<Self, DomainError> {
        Ok(Self {
            toggle_blocking: Arc::new(ToggleBlockingUseCase::new(
                adapters.control_api.clone(),
                adapters.notifier.clone(),
            )),
            get_filtering_status: Arc::new(GetFilteringStatusUseCase::new(
                adapters.control_api.clone(),
            )),
            log_view: Arc::new(LogViewSession::new(
                adapters.control_api.clone(),
                adapters.control_api.clone(),
                adapters.control_api.clone(),
                adapters.services.clone(),
                config.query_log.page_size,
            )?),
        })
    }
}
