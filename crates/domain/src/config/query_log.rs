use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueryLogConfig {
    /// Rows per table page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for QueryLogConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

fn default_page_size() -> u32 {
    100
}
