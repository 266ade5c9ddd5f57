mod client_repository;
mod filtering_repository;
mod notifier;
mod query_log_source;
mod service_catalog_port;

pub use client_repository::ClientRepository;
pub use filtering_repository::FilteringRepository;
pub use notifier::{Notification, Notifier};
pub use query_log_source::QueryLogSource;
pub use service_catalog_port::ServiceCatalogPort;
