use chrono::{DateTime, Utc};
use querylog_domain::pagination::FIRST_PAGE;
use querylog_domain::{DomainError, LogPage, PaginationCursor, RawLogEntry};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::ports::QueryLogSource;

/// Outcome of a page change or a resolved fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageChange {
    Fetched { entries_added: usize },
    Skipped(SkipReason),
    /// The result arrived for a session or generation that is gone.
    Discarded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotLastPage,
    FetchInFlight,
    BoundaryAlreadyFetched,
    SessionClosed,
}

/// Parameters of one issued fetch.
#[derive(Debug, Clone)]
struct FetchTicket {
    generation: u64,
    older_than: Option<DateTime<Utc>>,
    page: u32,
    page_size: u32,
    token: CancellationToken,
}

struct PagerState {
    cursor: PaginationCursor,
    entries: Vec<RawLogEntry>,
    fetch_in_flight: bool,
    /// `(page, accumulated entries)` of the last boundary a fetch was issued for.
    fetched_boundary: Option<(u32, usize)>,
    generation: u64,
    generation_token: CancellationToken,
}

/// Walks the query log backward in time, one extra fetch per page boundary.
///
/// At most one fetch is in flight. Results belonging to an earlier
/// generation (before a reset) or to a closed session are dropped.
pub struct PaginationController {
    source: Arc<dyn QueryLogSource>,
    session: CancellationToken,
    state: Mutex<PagerState>,
}

impl PaginationController {
    pub fn new(source: Arc<dyn QueryLogSource>, page_size: u32) -> Result<Self, DomainError> {
        let cursor = PaginationCursor::new(page_size)?;
        let session = CancellationToken::new();
        let generation_token = session.child_token();

        Ok(Self {
            source,
            session,
            state: Mutex::new(PagerState {
                cursor,
                entries: Vec::new(),
                fetch_in_flight: false,
                fetched_boundary: None,
                generation: 0,
                generation_token,
            }),
        })
    }

    fn state(&self) -> MutexGuard<'_, PagerState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Records `page` and fetches older entries when it is the last known page.
    pub async fn on_page_change(&self, page: u32) -> Result<PageChange, DomainError> {
        let ticket = {
            let mut state = self.state();
            if self.session.is_cancelled() {
                return Ok(PageChange::Skipped(SkipReason::SessionClosed));
            }

            state.cursor.page = page;

            if !state.cursor.is_last_known_page(page) {
                return Ok(PageChange::Skipped(SkipReason::NotLastPage));
            }
            if state.fetch_in_flight {
                debug!(page, "Fetch already in flight");
                return Ok(PageChange::Skipped(SkipReason::FetchInFlight));
            }

            let boundary = (page, state.entries.len());
            if state.fetched_boundary == Some(boundary) {
                return Ok(PageChange::Skipped(SkipReason::BoundaryAlreadyFetched));
            }

            state.fetch_in_flight = true;
            state.fetched_boundary = Some(boundary);
            FetchTicket {
                generation: state.generation,
                older_than: state.cursor.oldest,
                page,
                page_size: state.cursor.page_size,
                token: state.generation_token.clone(),
            }
        };

        self.run_fetch(ticket).await
    }

    /// Starts a new generation at page 0 and fetches the newest entries.
    ///
    /// A fetch still running for the previous generation is cancelled.
    pub async fn reset_to_first_page(&self) -> Result<PageChange, DomainError> {
        let ticket = {
            let mut state = self.state();
            if self.session.is_cancelled() {
                return Ok(PageChange::Skipped(SkipReason::SessionClosed));
            }

            state.generation_token.cancel();
            state.generation_token = self.session.child_token();
            state.generation += 1;
            state.cursor.reset();
            state.entries.clear();
            state.fetch_in_flight = true;
            state.fetched_boundary = None;

            FetchTicket {
                generation: state.generation,
                older_than: None,
                page: FIRST_PAGE,
                page_size: state.cursor.page_size,
                token: state.generation_token.clone(),
            }
        };

        info!(generation = ticket.generation, "Query log reset to first page");
        self.run_fetch(ticket).await
    }

    /// Applies a fetch result issued in `generation`.
    pub fn on_fetch_resolved(
        &self,
        generation: u64,
        page: LogPage,
    ) -> Result<PageChange, DomainError> {
        let mut state = self.state();
        if self.session.is_cancelled() || generation != state.generation {
            debug!(
                generation,
                current = state.generation,
                "Discarding stale query log fetch"
            );
            return Ok(PageChange::Discarded);
        }

        state.fetch_in_flight = false;

        if let Err(e) = state.cursor.check_backward(page.oldest) {
            state.fetched_boundary = None;
            error!(error = %e, "Inconsistent query log response");
            return Err(e);
        }

        let entries_added = page.entries.len();
        state.entries.extend(page.entries);
        let total_pages = state.cursor.pages_for(state.entries.len());
        state.cursor.advance(total_pages, page.oldest)?;

        debug!(
            entries_added,
            total_pages = state.cursor.total_pages,
            oldest = ?state.cursor.oldest,
            "Query log page applied"
        );
        Ok(PageChange::Fetched { entries_added })
    }

    /// Tears down the session; in-flight results are discarded.
    pub fn close(&self) {
        self.session.cancel();
        self.state().fetch_in_flight = false;
    }

    pub fn is_closed(&self) -> bool {
        self.session.is_cancelled()
    }

    pub fn is_fetch_in_flight(&self) -> bool {
        self.state().fetch_in_flight
    }

    pub fn generation(&self) -> u64 {
        self.state().generation
    }

    pub fn cursor(&self) -> PaginationCursor {
        self.state().cursor.clone()
    }

    pub fn entry_count(&self) -> usize {
        self.state().entries.len()
    }

    /// Accumulated entries that fall on `page`.
    pub fn page_entries(&self, page: u32) -> Vec<RawLogEntry> {
        let state = self.state();
        let range = state.cursor.page_range(page, state.entries.len());
        state.entries[range].to_vec()
    }

    async fn run_fetch(&self, ticket: FetchTicket) -> Result<PageChange, DomainError> {
        debug!(
            generation = ticket.generation,
            page = ticket.page,
            older_than = ?ticket.older_than,
            "Fetching query log"
        );

        let result = tokio::select! {
            _ = ticket.token.cancelled() => {
                debug!(generation = ticket.generation, "Query log fetch cancelled");
                return Ok(PageChange::Discarded);
            }
            result = self.source.fetch_logs(ticket.older_than, ticket.page, ticket.page_size) => result,
        };

        match result {
            Ok(page) => self.on_fetch_resolved(ticket.generation, page),
            Err(e) => {
                self.on_fetch_failed(ticket.generation);
                warn!(error = %e, page = ticket.page, "Query log fetch failed");
                Err(e)
            }
        }
    }

    fn on_fetch_failed(&self, generation: u64) {
        let mut state = self.state();
        if generation == state.generation {
            state.fetch_in_flight = false;
            state.fetched_boundary = None;
        }
    }
}

impl Drop for PaginationController {
    fn drop(&mut self) {
        self.session.cancel();
    }
}
