use arc_swap::ArcSwap;
use querylog_domain::{
    ClassifiedEntry, ClientDirectory, DomainError, FilteringStatus, LogFilter, PaginationCursor,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::ports::{ClientRepository, FilteringRepository, QueryLogSource, ServiceCatalogPort};
use crate::services::{LogEntryClassifier, PageChange, PaginationController};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogViewState {
    /// Query logging is turned off on the server; nothing was fetched.
    Disabled,
    Ready { total_pages: u32 },
}

/// One query log view: pager, classifier and the snapshots it classifies with.
pub struct LogViewSession {
    log_source: Arc<dyn QueryLogSource>,
    filtering_repo: Arc<dyn FilteringRepository>,
    client_repo: Arc<dyn ClientRepository>,
    services: Arc<dyn ServiceCatalogPort>,
    pager: PaginationController,
    classifier: ArcSwap<LogEntryClassifier>,
    filtering: ArcSwap<FilteringStatus>,
    clients: ArcSwap<ClientDirectory>,
    filter: ArcSwap<LogFilter>,
    enabled: AtomicBool,
}

impl LogViewSession {
    pub fn new(
        log_source: Arc<dyn QueryLogSource>,
        filtering_repo: Arc<dyn FilteringRepository>,
        client_repo: Arc<dyn ClientRepository>,
        services: Arc<dyn ServiceCatalogPort>,
        page_size: u32,
    ) -> Result<Self, DomainError> {
        let pager = PaginationController::new(log_source.clone(), page_size)?;
        let filtering = FilteringStatus::default();
        let classifier = LogEntryClassifier::from_status(&filtering, services.clone());

        Ok(Self {
            log_source,
            filtering_repo,
            client_repo,
            services,
            pager,
            classifier: ArcSwap::from_pointee(classifier),
            filtering: ArcSwap::from_pointee(filtering),
            clients: ArcSwap::from_pointee(ClientDirectory::default()),
            filter: ArcSwap::from_pointee(LogFilter::default()),
            enabled: AtomicBool::new(false),
        })
    }

    /// Loads the log settings and filtering status, then the first page.
    #[instrument(skip(self))]
    pub async fn open(&self) -> Result<LogViewState, DomainError> {
        let logs_config = self.log_source.fetch_logs_config().await?;
        self.enabled.store(logs_config.enabled, Ordering::Release);

        if !logs_config.enabled {
            info!("Query log is disabled on the server");
            return Ok(LogViewState::Disabled);
        }

        // Names degrade to "unknown filter" labels without a status.
        if let Err(e) = self.refresh_filtering().await {
            warn!(error = %e, "Filtering status unavailable, filter names unresolved");
        }
        if let Err(e) = self.refresh_clients().await {
            warn!(error = %e, "Client list unavailable, showing bare addresses");
        }

        self.pager.reset_to_first_page().await?;

        Ok(LogViewState::Ready {
            total_pages: self.pager.cursor().total_pages,
        })
    }

    /// Moves to `page` and returns its classified rows.
    pub async fn change_page(&self, page: u32) -> Result<Vec<ClassifiedEntry>, DomainError> {
        self.ensure_enabled()?;
        self.pager.on_page_change(page).await?;
        Ok(self.rows(page))
    }

    /// Visits every page up to `page` in order, as a reader paging forward
    /// would, so each boundary on the way gets its continuation fetch.
    pub async fn walk_to_page(&self, page: u32) -> Result<Vec<ClassifiedEntry>, DomainError> {
        self.ensure_enabled()?;
        for p in 0..=page {
            self.pager.on_page_change(p).await?;
        }
        Ok(self.rows(page))
    }

    /// Starts over from the newest entries.
    pub async fn reload(&self) -> Result<PageChange, DomainError> {
        self.ensure_enabled()?;
        self.pager.reset_to_first_page().await
    }

    /// Classified rows of `page` from what has been fetched so far, narrowed
    /// by the active filter.
    pub fn rows(&self, page: u32) -> Vec<ClassifiedEntry> {
        let entries = self.pager.page_entries(page);
        let mut rows = self.classifier.load().classify_all(&entries);
        let filter = self.filter.load();
        if !filter.is_empty() {
            rows.retain(|row| filter.matches(row));
        }
        rows
    }

    pub fn set_filter(&self, filter: LogFilter) {
        debug!(?filter, "Query log filter changed");
        self.filter.store(Arc::new(filter));
    }

    pub fn filter(&self) -> Arc<LogFilter> {
        self.filter.load_full()
    }

    pub async fn refresh_clients(&self) -> Result<(), DomainError> {
        let records = self.client_repo.fetch_clients().await?;
        let directory = ClientDirectory::build(&records);
        debug!(clients = directory.len(), "Client directory loaded");
        self.clients.store(Arc::new(directory));
        self.rebuild_classifier();
        Ok(())
    }

    pub async fn refresh_filtering(&self) -> Result<(), DomainError> {
        let status = self.filtering_repo.fetch_filtering_status().await?;
        self.apply_filtering_status(status);
        Ok(())
    }

    /// Rebuilds the classifier for a new filtering status.
    pub fn apply_filtering_status(&self, status: FilteringStatus) {
        self.filtering.store(Arc::new(status));
        self.rebuild_classifier();
    }

    fn rebuild_classifier(&self) {
        let classifier =
            LogEntryClassifier::from_status(&self.filtering.load(), self.services.clone())
                .with_clients(self.clients.load_full());
        self.classifier.store(Arc::new(classifier));
    }

    pub fn filtering_status(&self) -> Arc<FilteringStatus> {
        self.filtering.load_full()
    }

    pub fn cursor(&self) -> PaginationCursor {
        self.pager.cursor()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    pub fn close(&self) {
        self.pager.close();
        info!("Query log session closed");
    }

    fn ensure_enabled(&self) -> Result<(), DomainError> {
        if self.is_enabled() {
            Ok(())
        } else {
            Err(DomainError::QueryLogDisabled)
        }
    }
}
