use querylog_domain::{Config, DomainError};
use querylog_infrastructure::control_api::ControlApiClient;
use querylog_infrastructure::notifier::TracingNotifier;
use querylog_infrastructure::service_catalog::ServiceCatalog;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub struct Adapters {
    pub control_api: Arc<ControlApiClient>,
    pub services: Arc<ServiceCatalog>,
    pub notifier: Arc<TracingNotifier>,
}

impl Adapters {
    pub fn new(config: &Config) -> Result<Self, DomainError> {
        let control_api = ControlApiClient::new(
            &config.server.url,
            Duration::from_secs(config.server.timeout_secs),
        )?;
        let services = ServiceCatalog::load();
        debug!(
            url = %control_api.base_url(),
            services = services.len(),
            "Adapters ready"
        );

        Ok(Self {
            control_api: Arc::new(control_api),
            services: Arc::new(services),
            notifier: Arc::new(TracingNotifier::new()),
        })
    }
}
