pub mod toggle_blocking;

pub use toggle_blocking::{ToggleBlockingUseCase, ToggleOutcome};
