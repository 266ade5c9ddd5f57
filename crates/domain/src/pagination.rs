use crate::log_entry::RawLogEntry;
use crate::DomainError;
use chrono::{DateTime, Utc};

pub const FIRST_PAGE: u32 = 0;

/// Backward-walking position in the query log.
///
/// `oldest` only ever moves back in time across fetches; `None` means
/// nothing has been fetched yet in this session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationCursor {
    pub page: u32,
    pub page_size: u32,
    pub oldest: Option<DateTime<Utc>>,
    pub total_pages: u32,
}

impl PaginationCursor {
    pub fn new(page_size: u32) -> Result<Self, DomainError> {
        if page_size == 0 {
            return Err(DomainError::InvalidPageSize(page_size));
        }
        Ok(Self {
            page: FIRST_PAGE,
            page_size,
            oldest: None,
            total_pages: 0,
        })
    }

    pub fn reset(&mut self) {
        self.page = FIRST_PAGE;
        self.oldest = None;
        self.total_pages = 0;
    }

    /// True when `page` is the last page currently known.
    pub fn is_last_known_page(&self, page: u32) -> bool {
        self.total_pages > 0 && page.saturating_add(1) == self.total_pages
    }

    /// Checks that `received` does not move the cursor forward in time.
    pub fn check_backward(&self, received: Option<DateTime<Utc>>) -> Result<(), DomainError> {
        match (self.oldest, received) {
            (Some(previous), Some(received)) if received > previous => {
                Err(DomainError::CursorMovedForward { previous, received })
            }
            _ => Ok(()),
        }
    }

    /// Applies a fetch result. A missing `oldest` keeps the current cursor.
    pub fn advance(
        &mut self,
        total_pages: u32,
        oldest: Option<DateTime<Utc>>,
    ) -> Result<(), DomainError> {
        self.check_backward(oldest)?;
        self.total_pages = total_pages;
        if oldest.is_some() {
            self.oldest = oldest;
        }
        Ok(())
    }

    /// Number of pages needed to show `entries` rows.
    pub fn pages_for(&self, entries: usize) -> u32 {
        entries.div_ceil(self.page_size as usize) as u32
    }

    /// Index range of `page` within the accumulated entries.
    pub fn page_range(&self, page: u32, len: usize) -> std::ops::Range<usize> {
        let size = self.page_size as usize;
        let start = (page as usize).saturating_mul(size).min(len);
        let end = start.saturating_add(size).min(len);
        start..end
    }
}

/// Result of one log fetch.
///
/// Page counts are derived from the accumulated history by the pager, not
/// reported by the source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogPage {
    pub entries: Vec<RawLogEntry>,
    pub oldest: Option<DateTime<Utc>>,
}

/// Query log settings that gate the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogsConfig {
    pub enabled: bool,
    pub interval_days: u32,
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_days: 1,
        }
    }
}
