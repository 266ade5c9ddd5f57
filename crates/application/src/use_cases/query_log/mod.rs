pub mod log_view_session;

pub use log_view_session::{LogViewSession, LogViewState};
