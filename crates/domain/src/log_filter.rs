use crate::classification::ClassifiedEntry;

/// Search over classified log rows. Empty criteria match everything.
///
/// Text criteria are case-insensitive substring matches; the client
/// criterion also matches the resolved client name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogFilter {
    pub domain: Option<String>,
    pub client: Option<String>,
    pub query_type: Option<String>,
    pub response: Option<String>,
    pub filtered_only: bool,
}

impl LogFilter {
    pub fn is_empty(&self) -> bool {
        self.domain.is_none()
            && self.client.is_none()
            && self.query_type.is_none()
            && self.response.is_none()
            && !self.filtered_only
    }

    pub fn matches(&self, row: &ClassifiedEntry) -> bool {
        let entry = &row.entry;

        if let Some(domain) = &self.domain {
            if !contains_ignore_case(&entry.domain, domain) {
                return false;
            }
        }

        if let Some(client) = &self.client {
            let by_name = row
                .client_name
                .as_deref()
                .is_some_and(|name| contains_ignore_case(name, client));
            if !by_name && !contains_ignore_case(&entry.client, client) {
                return false;
            }
        }

        if let Some(query_type) = &self.query_type {
            if !entry.query_type.eq_ignore_ascii_case(query_type.trim()) {
                return false;
            }
        }

        if let Some(response) = &self.response {
            if !entry
                .responses
                .iter()
                .any(|r| contains_ignore_case(r, response))
            {
                return false;
            }
        }

        !self.filtered_only || row.classification.row_tag() == crate::RowTag::Filtered
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack
        .to_lowercase()
        .contains(needle.trim().to_lowercase().as_str())
}
