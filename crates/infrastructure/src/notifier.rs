use querylog_application::ports::{Notification, Notifier};
use tracing::{info, warn};

/// Reports use case notifications through the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl TracingNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        if notification.is_failure() {
            warn!(notification = %notification, "Action failed");
        } else {
            info!(notification = %notification, "Action completed");
        }
    }
}
