use std::sync::Arc;

/// A bundled blockable service (e.g. `youtube`, `tiktok`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDefinition {
    pub id: Arc<str>,
    pub name: Arc<str>,
}

impl ServiceDefinition {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: Arc::from(id),
            name: Arc::from(name),
        }
    }
}
