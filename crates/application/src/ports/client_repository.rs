use async_trait::async_trait;
use querylog_domain::{ClientRecord, DomainError};

#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Configured and auto-discovered clients known to the server.
    async fn fetch_clients(&self) -> Result<Vec<ClientRecord>, DomainError>;
}
