//! Client for the DNS server's HTTP control API.
//!
//! Implements the query log source, the filtering repository and the client
//! repository on top of a single pooled `reqwest::Client`:
//!
//! ```text
//! GET  /control/querylog?older_than=<rfc3339>   -> { data, oldest }
//! GET  /control/querylog_info                   -> { enabled, interval }
//! GET  /control/filtering/status                -> { enabled, filters, user_rules }
//! POST /control/filtering/set_rules             <- rule text
//! GET  /control/clients                         -> { clients, auto_clients }
//! ```

mod clients;
mod filtering;
mod query_log;
mod wire;

use querylog_domain::DomainError;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("querylog/", env!("CARGO_PKG_VERSION"), " (control-api)");

pub struct ControlApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ControlApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, DomainError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .pool_max_idle_per_host(2)
            .build()
            .map_err(|e| DomainError::Transport {
                server: base_url.clone(),
                message: e.to_string(),
            })?;

        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GETs `path` and decodes the JSON body.
    ///
    /// `on_status` builds the error for a non-success HTTP status.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        on_status: fn(String) -> DomainError,
    ) -> Result<T, DomainError> {
        let url = self.endpoint(path);
        debug!(url = %url, "Control API request");

        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "Control API returned error status");
            return Err(on_status(format!("HTTP {} for {}", status.as_u16(), url)));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;

        serde_json::from_slice(&body)
            .map_err(|e| DomainError::InvalidResponse(format!("{}: {}", path, e)))
    }

    async fn post_text(
        &self,
        path: &str,
        body: String,
        on_status: fn(String) -> DomainError,
    ) -> Result<(), DomainError> {
        let url = self.endpoint(path);
        debug!(url = %url, body_len = body.len(), "Control API request");

        let response = self
            .http
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .body(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            warn!(url = %url, status = status.as_u16(), detail = %detail.trim(), "Control API rejected update");
            return Err(on_status(format!(
                "HTTP {} for {}: {}",
                status.as_u16(),
                url,
                detail.trim()
            )));
        }

        Ok(())
    }

    fn transport_error(&self, e: reqwest::Error) -> DomainError {
        if e.is_timeout() {
            DomainError::TransportTimeout {
                server: self.base_url.clone(),
            }
        } else {
            DomainError::Transport {
                server: self.base_url.clone(),
                message: e.to_string(),
            }
        }
    }
}
