use querylog_domain::ServiceDefinition;

pub trait ServiceCatalogPort: Send + Sync {
    fn get_by_id(&self, id: &str) -> Option<ServiceDefinition>;
    fn all(&self) -> Vec<ServiceDefinition>;
}
