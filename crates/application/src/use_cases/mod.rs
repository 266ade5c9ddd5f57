pub mod filtering;
pub mod query_log;
pub mod rules;

pub use filtering::GetFilteringStatusUseCase;
pub use query_log::{LogViewSession, LogViewState};
pub use rules::{ToggleBlockingUseCase, ToggleOutcome};
