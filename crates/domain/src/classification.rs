use crate::log_entry::{reason, RawLogEntry};
use crate::user_rules::ToggleAction;
use serde::Serialize;

pub const CUSTOM_RULES_LABEL: &str = "Custom filtering rules";
pub const REWRITE_APPLIED_LABEL: &str = "Rewrite applied";

pub fn unknown_filter_label(filter_id: i64) -> String {
    format!("Unknown filter #{}", filter_id)
}

/// Category of a `reason` string before any name is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReasonCategory {
    Normal,
    Filtered,
    Whitelisted,
    Rewritten,
    BlockedService,
}

impl ReasonCategory {
    /// First match wins. The exact blocked-service reason is tested before
    /// the generic `Filtered` prefix it starts with.
    pub fn from_reason(reason: &str) -> Self {
        if reason == reason::FILTERED_BLOCKED_SERVICE {
            ReasonCategory::BlockedService
        } else if reason.starts_with(reason::FILTERED_PREFIX) {
            ReasonCategory::Filtered
        } else if reason == reason::REWRITE {
            ReasonCategory::Rewritten
        } else if reason == reason::NOT_FILTERED_WHITE_LIST {
            ReasonCategory::Whitelisted
        } else {
            ReasonCategory::Normal
        }
    }
}

/// Exclusive classification of a log entry with resolved display names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum Classification {
    Normal,
    Filtered { filter_name: String },
    Whitelisted { filter_name: String },
    Rewritten,
    BlockedService { service_name: String },
}

impl Classification {
    pub fn filter_name(&self) -> Option<&str> {
        match self {
            Classification::Filtered { filter_name }
            | Classification::Whitelisted { filter_name } => Some(filter_name),
            _ => None,
        }
    }

    pub fn is_filtered(&self) -> bool {
        matches!(self, Classification::Filtered { .. })
    }

    pub fn row_tag(&self) -> RowTag {
        match self {
            Classification::Filtered { .. } | Classification::BlockedService { .. } => {
                RowTag::Filtered
            }
            Classification::Whitelisted { .. } => RowTag::Whitelisted,
            Classification::Rewritten => RowTag::Rewritten,
            Classification::Normal => RowTag::None,
        }
    }
}

/// Row-level color tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowTag {
    None,
    Filtered,
    Whitelisted,
    Rewritten,
}

/// A log entry together with everything the view needs to annotate it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedEntry {
    #[serde(skip)]
    pub entry: RawLogEntry,
    #[serde(flatten)]
    pub classification: Classification,
    pub is_rewrite: bool,
    /// Reason with the `Filtered` prefix stripped; a lookup hint only.
    pub filter_key: Option<String>,
    /// Tooltip payload: the matched rule, or the service name for blocked services.
    pub display_rule: String,
    /// Known client name for `entry.client`, if any.
    pub client_name: Option<String>,
    /// Inline annotation shown next to the response.
    pub annotation: Option<String>,
    pub row_tag: RowTag,
}

impl ClassifiedEntry {
    /// `name (address)` for known clients, the bare address otherwise.
    pub fn client_label(&self) -> String {
        match &self.client_name {
            Some(name) => format!("{} ({})", name, self.entry.client),
            None => self.entry.client.clone(),
        }
    }

    /// The block/unblock action offered for this row.
    ///
    /// Rewritten answers are configured elsewhere and offer none.
    pub fn suggested_action(&self) -> Option<ToggleAction> {
        if self.is_rewrite {
            return None;
        }
        match self.classification {
            Classification::Filtered { .. } | Classification::BlockedService { .. } => {
                Some(ToggleAction::Unblock)
            }
            _ => Some(ToggleAction::Block),
        }
    }
}
