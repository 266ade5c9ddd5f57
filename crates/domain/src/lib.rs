//! Query log console domain layer
pub mod classification;
pub mod client_directory;
pub mod config;
pub mod errors;
pub mod filter_list;
pub mod log_entry;
pub mod log_filter;
pub mod pagination;
pub mod service_catalog;
pub mod user_rules;

pub use classification::{ClassifiedEntry, Classification, ReasonCategory, RowTag};
pub use client_directory::{ClientDirectory, ClientRecord, ClientSource};
pub use config::{CliOverrides, Config, ConfigError};
pub use errors::DomainError;
pub use filter_list::{FilterCatalogEntry, FilterNameIndex, FilteringStatus, CUSTOM_RULES_FILTER_ID};
pub use log_entry::RawLogEntry;
pub use log_filter::LogFilter;
pub use pagination::{LogPage, LogsConfig, PaginationCursor};
pub use service_catalog::ServiceDefinition;
pub use user_rules::{OverrideKind, RuleChange, RuleChangeKind, RuleSet, ToggleAction};
