use querylog_domain::{DomainError, FilteringStatus, RuleChange, ToggleAction};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument, warn};

use crate::ports::{FilteringRepository, Notification, Notifier};

#[derive(Debug, Clone)]
pub struct ToggleOutcome {
    /// `None` when the rules already satisfied the action.
    pub change: Option<RuleChange>,
    /// Filtering status re-read after the update.
    pub status: FilteringStatus,
}

/// Read-modify-write of the user rules.
///
/// Only one update runs at a time per use case; a second caller gets
/// `RulesUpdateInProgress` instead of racing the first one's write.
pub struct ToggleBlockingUseCase {
    filtering_repo: Arc<dyn FilteringRepository>,
    notifier: Arc<dyn Notifier>,
    in_flight: Mutex<()>,
}

impl ToggleBlockingUseCase {
    pub fn new(filtering_repo: Arc<dyn FilteringRepository>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            filtering_repo,
            notifier,
            in_flight: Mutex::new(()),
        }
    }

    pub fn is_processing(&self) -> bool {
        self.in_flight.try_lock().is_err()
    }

    /// Reads the current rules and applies the action to them.
    #[instrument(skip(self))]
    pub async fn execute(
        &self,
        domain: &str,
        action: ToggleAction,
    ) -> Result<ToggleOutcome, DomainError> {
        let _guard = self.begin()?;
        let status = self.filtering_repo.fetch_filtering_status().await?;
        self.apply(&status, domain, action).await
    }

    /// Applies the action to an already loaded filtering status.
    #[instrument(skip(self, status))]
    pub async fn execute_with(
        &self,
        status: &FilteringStatus,
        domain: &str,
        action: ToggleAction,
    ) -> Result<ToggleOutcome, DomainError> {
        let _guard = self.begin()?;
        self.apply(status, domain, action).await
    }

    fn begin(&self) -> Result<tokio::sync::MutexGuard<'_, ()>, DomainError> {
        self.in_flight.try_lock().map_err(|_| {
            debug!("Rules update already in flight");
            DomainError::RulesUpdateInProgress
        })
    }

    async fn apply(
        &self,
        status: &FilteringStatus,
        domain: &str,
        action: ToggleAction,
    ) -> Result<ToggleOutcome, DomainError> {
        if status.processing_rules {
            return Err(DomainError::RulesUpdateInProgress);
        }

        let (next_rules, change) = status.user_rules.toggle(domain, action)?;

        match &change {
            Some(change) => {
                if let Err(e) = self.filtering_repo.persist_rules(&next_rules).await {
                    error!(error = %e, domain = %domain, "Failed to persist user rules");
                    self.notifier.notify(Notification::Failure(e.to_string()));
                    return Err(e);
                }

                info!(
                    domain = %domain,
                    action = action.as_str(),
                    rule = %change.rule,
                    kind = ?change.kind,
                    "User rules updated"
                );
                self.notifier.notify(Notification::from(change));
            }
            None => {
                debug!(domain = %domain, action = action.as_str(), "Rules already satisfy action");
            }
        }

        // The write already landed; a failed re-read must not report it as failed.
        let status = match self.filtering_repo.fetch_filtering_status().await {
            Ok(status) => status,
            Err(e) => {
                warn!(error = %e, "Filtering status re-read failed, using local rules");
                FilteringStatus {
                    user_rules: next_rules,
                    ..status.clone()
                }
            }
        };

        Ok(ToggleOutcome { change, status })
    }
}
