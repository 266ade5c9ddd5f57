mod log_entry_classifier;
mod pagination_controller;

pub use log_entry_classifier::LogEntryClassifier;
pub use pagination_controller::{PageChange, PaginationController, SkipReason};
