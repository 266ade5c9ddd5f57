use async_trait::async_trait;
use querylog_application::ports::ClientRepository;
use querylog_domain::{ClientRecord, DomainError};
use tracing::debug;

use super::wire::ClientsResponse;
use super::ControlApiClient;

const CLIENTS_PATH: &str = "/control/clients";

#[async_trait]
impl ClientRepository for ControlApiClient {
    async fn fetch_clients(&self) -> Result<Vec<ClientRecord>, DomainError> {
        let response: ClientsResponse = self
            .get_json(CLIENTS_PATH, &[], DomainError::FetchFailed)
            .await?;

        let records = response.into_records();
        debug!(clients = records.len(), "Clients fetched");
        Ok(records)
    }
}
