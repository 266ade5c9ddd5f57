use querylog_application::ports::ServiceCatalogPort;
use querylog_domain::{DomainError, ServiceDefinition};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::error;

#[derive(Deserialize)]
struct RawService {
    id: String,
    name: String,
}

/// Embedded catalog of blockable services loaded from catalog.json at compile time.
pub struct ServiceCatalog {
    services: Vec<ServiceDefinition>,
    by_id: HashMap<Arc<str>, usize>,
}

impl ServiceCatalog {
    pub fn load() -> Self {
        Self::from_json(include_str!("catalog.json")).unwrap_or_else(|e| {
            error!(error = %e, "Bundled service catalog is unreadable");
            Self::from_services(Vec::new())
        })
    }

    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        let raw: Vec<RawService> = serde_json::from_str(json)
            .map_err(|e| DomainError::InvalidResponse(format!("service catalog: {}", e)))?;

        Ok(Self::from_services(
            raw.iter()
                .map(|r| ServiceDefinition::new(&r.id, &r.name))
                .collect(),
        ))
    }

    pub fn from_services(services: Vec<ServiceDefinition>) -> Self {
        let mut by_id = HashMap::with_capacity(services.len());
        for (idx, svc) in services.iter().enumerate() {
            by_id.entry(Arc::clone(&svc.id)).or_insert(idx);
        }
        Self { services, by_id }
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl ServiceCatalogPort for ServiceCatalog {
    fn get_by_id(&self, id: &str) -> Option<ServiceDefinition> {
        self.by_id.get(id).map(|&idx| self.services[idx].clone())
    }

    fn all(&self) -> Vec<ServiceDefinition> {
        self.services.clone()
    }
}
