use querylog_domain::{RuleChange, RuleChangeKind};
use std::fmt;

/// User-facing message produced by a use case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    RuleAdded(String),
    RuleRemoved(String),
    Failure(String),
}

impl Notification {
    pub fn is_failure(&self) -> bool {
        matches!(self, Notification::Failure(_))
    }
}

impl From<&RuleChange> for Notification {
    fn from(change: &RuleChange) -> Self {
        match change.kind {
            RuleChangeKind::Added => Notification::RuleAdded(change.rule.clone()),
            RuleChangeKind::Removed => Notification::RuleRemoved(change.rule.clone()),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notification::RuleAdded(rule) => {
                write!(f, "Rule added to the custom filtering rules: {}", rule)
            }
            Notification::RuleRemoved(rule) => {
                write!(f, "Rule removed from the custom filtering rules: {}", rule)
            }
            Notification::Failure(message) => f.write_str(message),
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}
