pub mod control_api;
pub mod notifier;
pub mod service_catalog;
