use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid page size: {0}")]
    InvalidPageSize(u32),

    #[error("Rules update already in progress")]
    RulesUpdateInProgress,

    #[error("Failed to persist user rules: {0}")]
    PersistFailed(String),

    #[error("Failed to fetch query log: {0}")]
    FetchFailed(String),

    #[error("Failed to fetch filtering status: {0}")]
    FilteringStatusUnavailable(String),

    #[error("Query log is disabled")]
    QueryLogDisabled,

    #[error("Query log cursor moved forward: previous {previous}, received {received}")]
    CursorMovedForward {
        previous: DateTime<Utc>,
        received: DateTime<Utc>,
    },

    #[error("Invalid control API response: {0}")]
    InvalidResponse(String),

    #[error("Transport timeout connecting to {server}")]
    TransportTimeout { server: String },

    #[error("Transport error talking to {server}: {message}")]
    Transport { server: String, message: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
