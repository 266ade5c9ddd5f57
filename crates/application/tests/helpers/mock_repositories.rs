#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use querylog_application::ports::{
    ClientRepository, FilteringRepository, Notification, Notifier, QueryLogSource,
    ServiceCatalogPort,
};
use querylog_domain::{
    ClientRecord, DomainError, FilterCatalogEntry, FilteringStatus, LogPage, LogsConfig,
    RawLogEntry, RuleSet, ServiceDefinition,
};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::{Mutex, Notify, RwLock, Semaphore};

pub fn ts(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

pub fn entry_at(secs: i64, domain: &str) -> RawLogEntry {
    RawLogEntry::new(ts(secs), domain)
}

/// `count` entries walking backward from `newest_secs`, one second apart.
pub fn entries_from(newest_secs: i64, count: usize) -> Vec<RawLogEntry> {
    (0..count)
        .map(|i| entry_at(newest_secs - i as i64, &format!("host{}.example.com", i)))
        .collect()
}

pub fn log_page(entries: Vec<RawLogEntry>) -> LogPage {
    let oldest = entries.last().map(|e| e.timestamp);
    LogPage { entries, oldest }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchCall {
    pub older_than: Option<DateTime<Utc>>,
    pub page: u32,
    pub page_size: u32,
}

#[derive(Clone)]
pub struct MockQueryLogSource {
    responses: Arc<Mutex<VecDeque<Result<LogPage, DomainError>>>>,
    calls: Arc<Mutex<Vec<FetchCall>>>,
    logs_config: Arc<RwLock<LogsConfig>>,
    gate: Option<Arc<Semaphore>>,
    started: Arc<Notify>,
}

impl MockQueryLogSource {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            logs_config: Arc::new(RwLock::new(LogsConfig::default())),
            gate: None,
            started: Arc::new(Notify::new()),
        }
    }

    /// Every fetch waits for a permit from `release`.
    pub fn gated() -> Self {
        Self {
            gate: Some(Arc::new(Semaphore::new(0))),
            ..Self::new()
        }
    }

    pub fn release(&self, fetches: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(fetches);
        }
    }

    /// Waits until at least `count` fetches have been issued.
    pub async fn wait_for_calls(&self, count: usize) {
        loop {
            if self.call_count().await >= count {
                return;
            }
            self.started.notified().await;
        }
    }

    pub async fn push_response(&self, response: Result<LogPage, DomainError>) {
        self.responses.lock().await.push_back(response);
    }

    pub async fn set_enabled(&self, enabled: bool) {
        self.logs_config.write().await.enabled = enabled;
    }

    pub async fn calls(&self) -> Vec<FetchCall> {
        self.calls.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }
}

impl Default for MockQueryLogSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QueryLogSource for MockQueryLogSource {
    async fn fetch_logs(
        &self,
        older_than: Option<DateTime<Utc>>,
        page: u32,
        page_size: u32,
    ) -> Result<LogPage, DomainError> {
        self.calls.lock().await.push(FetchCall {
            older_than,
            page,
            page_size,
        });
        self.started.notify_one();

        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }

        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| {
                Ok(LogPage {
                    entries: vec![],
                    oldest: older_than,
                })
            })
    }

    async fn fetch_logs_config(&self) -> Result<LogsConfig, DomainError> {
        Ok(*self.logs_config.read().await)
    }
}

#[derive(Clone)]
pub struct MockFilteringRepository {
    status: Arc<RwLock<FilteringStatus>>,
    persisted: Arc<Mutex<Vec<RuleSet>>>,
    fetches: Arc<Mutex<usize>>,
    fail_persist: Arc<RwLock<bool>>,
    fail_status: Arc<RwLock<bool>>,
    fail_status_after: Arc<RwLock<Option<usize>>>,
    persist_gate: Option<Arc<Semaphore>>,
    persist_started: Arc<Notify>,
    persist_calls: Arc<Mutex<usize>>,
}

impl MockFilteringRepository {
    pub fn new() -> Self {
        Self::with_rules("")
    }

    pub fn with_rules(rules: &str) -> Self {
        Self {
            status: Arc::new(RwLock::new(FilteringStatus {
                enabled: true,
                user_rules: RuleSet::new(rules),
                filters: vec![],
                processing_rules: false,
            })),
            persisted: Arc::new(Mutex::new(Vec::new())),
            fetches: Arc::new(Mutex::new(0)),
            fail_persist: Arc::new(RwLock::new(false)),
            fail_status: Arc::new(RwLock::new(false)),
            fail_status_after: Arc::new(RwLock::new(None)),
            persist_gate: None,
            persist_started: Arc::new(Notify::new()),
            persist_calls: Arc::new(Mutex::new(0)),
        }
    }

    /// Every persist waits for a permit from `release_persist`.
    pub fn gated_persist(self) -> Self {
        Self {
            persist_gate: Some(Arc::new(Semaphore::new(0))),
            ..self
        }
    }

    pub fn release_persist(&self, persists: usize) {
        if let Some(gate) = &self.persist_gate {
            gate.add_permits(persists);
        }
    }

    /// Waits until at least `count` persists have started.
    pub async fn wait_for_persist(&self, count: usize) {
        loop {
            if *self.persist_calls.lock().await >= count {
                return;
            }
            self.persist_started.notified().await;
        }
    }

    /// Status reads succeed `reads` times, then fail.
    pub async fn fail_status_after(&self, reads: usize) {
        *self.fail_status_after.write().await = Some(reads);
    }

    pub async fn set_filters(&self, filters: Vec<FilterCatalogEntry>) {
        self.status.write().await.filters = filters;
    }

    pub async fn set_processing_rules(&self, processing: bool) {
        self.status.write().await.processing_rules = processing;
    }

    pub async fn set_fail_persist(&self, fail: bool) {
        *self.fail_persist.write().await = fail;
    }

    pub async fn set_fail_status(&self, fail: bool) {
        *self.fail_status.write().await = fail;
    }

    pub async fn rules(&self) -> RuleSet {
        self.status.read().await.user_rules.clone()
    }

    pub async fn persisted(&self) -> Vec<RuleSet> {
        self.persisted.lock().await.clone()
    }

    pub async fn status_fetches(&self) -> usize {
        *self.fetches.lock().await
    }
}

impl Default for MockFilteringRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FilteringRepository for MockFilteringRepository {
    async fn fetch_filtering_status(&self) -> Result<FilteringStatus, DomainError> {
        let fetches = {
            let mut fetches = self.fetches.lock().await;
            *fetches += 1;
            *fetches
        };
        let exhausted = matches!(*self.fail_status_after.read().await, Some(n) if fetches > n);
        if exhausted || *self.fail_status.read().await {
            return Err(DomainError::FilteringStatusUnavailable(
                "mock status failure".to_string(),
            ));
        }
        Ok(self.status.read().await.clone())
    }

    async fn persist_rules(&self, rules: &RuleSet) -> Result<(), DomainError> {
        *self.persist_calls.lock().await += 1;
        self.persist_started.notify_one();
        if let Some(gate) = &self.persist_gate {
            gate.acquire().await.unwrap().forget();
        }
        if *self.fail_persist.read().await {
            return Err(DomainError::PersistFailed("mock persist failure".to_string()));
        }
        self.persisted.lock().await.push(rules.clone());
        self.status.write().await.user_rules = rules.clone();
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MockClientRepository {
    clients: Arc<RwLock<Vec<ClientRecord>>>,
    fail: Arc<RwLock<bool>>,
}

impl MockClientRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clients(clients: Vec<ClientRecord>) -> Self {
        Self {
            clients: Arc::new(RwLock::new(clients)),
            ..Self::default()
        }
    }

    pub async fn set_fail(&self, fail: bool) {
        *self.fail.write().await = fail;
    }
}

#[async_trait]
impl ClientRepository for MockClientRepository {
    async fn fetch_clients(&self) -> Result<Vec<ClientRecord>, DomainError> {
        if *self.fail.read().await {
            return Err(DomainError::FetchFailed("mock clients failure".to_string()));
        }
        Ok(self.clients.read().await.clone())
    }
}

#[derive(Clone, Default)]
pub struct RecordingNotifier {
    notifications: Arc<std::sync::Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications.lock().unwrap().push(notification);
    }
}

pub struct MockServiceCatalog {
    services: Vec<ServiceDefinition>,
}

impl MockServiceCatalog {
    pub fn new() -> Self {
        Self {
            services: vec![
                ServiceDefinition::new("youtube", "YouTube"),
                ServiceDefinition::new("tiktok", "TikTok"),
                ServiceDefinition::new("netflix", "Netflix"),
            ],
        }
    }
}

impl Default for MockServiceCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceCatalogPort for MockServiceCatalog {
    fn get_by_id(&self, id: &str) -> Option<ServiceDefinition> {
        self.services.iter().find(|s| s.id.as_ref() == id).cloned()
    }

    fn all(&self) -> Vec<ServiceDefinition> {
        self.services.clone()
    }
}
