//! Provider gateway - budget-bounded provider calls.
//!
//! Every provider call goes through here so the hard client-side timeout
//! is applied in exactly one place: min(remaining budget, the provider's
//! default timeout). Adapters receive the effective timeout and the
//! gateway additionally races the call against it, so a misbehaving
//! adapter cannot block past the window.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::foundation::DeadlineBudget;
use crate::domain::intake::IntakeSession;
use crate::ports::{AuditProvider, DirectoryProvider, ProviderError};

use super::report::{AuditPayload, DirectoryEntry};

/// Maximum directory entries attached to an analysis.
const MAX_DIRECTORY_ENTRIES: usize = 3;

/// Why a provider call was not attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The deadline budget could not afford the call.
    NoTime,
    /// The caller supplied no location.
    NoLocation,
    /// No specialty was derived, so there is nothing to look up.
    NoSpecialty,
}

/// Outcome of one budget-bounded provider call.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderOutcome<T> {
    Success(T),
    Failure(ProviderError),
    Skipped(SkipReason),
}

impl<T> ProviderOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, ProviderOutcome::Success(_))
    }

    /// The payload, when the call succeeded.
    pub fn payload(&self) -> Option<&T> {
        match self {
            ProviderOutcome::Success(payload) => Some(payload),
            _ => None,
        }
    }

    /// Short tag for logs and degradation markers.
    pub fn tag(&self) -> &'static str {
        match self {
            ProviderOutcome::Success(_) => "success",
            ProviderOutcome::Failure(err) => err.kind(),
            ProviderOutcome::Skipped(SkipReason::NoTime) => "skipped_no_time",
            ProviderOutcome::Skipped(SkipReason::NoLocation) => "skipped_no_location",
            ProviderOutcome::Skipped(SkipReason::NoSpecialty) => "skipped_no_specialty",
        }
    }
}

/// Budget-aware front door to the analysis providers.
pub struct ProviderGateway {
    audit: Arc<dyn AuditProvider>,
    directory: Arc<dyn DirectoryProvider>,
    /// Provider default timeouts, each capped by the budget per call.
    audit_timeout: Duration,
    lookup_timeout: Duration,
}

impl ProviderGateway {
    pub fn new(audit: Arc<dyn AuditProvider>, directory: Arc<dyn DirectoryProvider>) -> Self {
        Self {
            audit,
            directory,
            audit_timeout: Duration::from_millis(5000),
            lookup_timeout: Duration::from_millis(2000),
        }
    }

    /// Sets the audit provider's default timeout.
    pub fn with_audit_timeout(mut self, timeout: Duration) -> Self {
        self.audit_timeout = timeout;
        self
    }

    /// Sets the directory provider's default timeout.
    pub fn with_lookup_timeout(mut self, timeout: Duration) -> Self {
        self.lookup_timeout = timeout;
        self
    }

    /// Runs the structured audit under the budget.
    pub async fn run_audit(
        &self,
        session: &IntakeSession,
        budget: &DeadlineBudget,
    ) -> ProviderOutcome<AuditPayload> {
        let timeout = budget.clamp(self.audit_timeout);
        let outcome =
            match tokio::time::timeout(timeout, self.audit.run_audit(session, timeout)).await {
                Ok(Ok(payload)) => ProviderOutcome::Success(payload),
                Ok(Err(err)) => ProviderOutcome::Failure(err),
                Err(_) => ProviderOutcome::Failure(ProviderError::Timeout),
            };
        tracing::info!(outcome = outcome.tag(), timeout_ms = timeout.as_millis() as u64, "audit call finished");
        outcome
    }

    /// Looks up directory entries; every error degrades to an empty list.
    pub async fn find_lawyers(
        &self,
        location: &str,
        specialty: &str,
        budget: &DeadlineBudget,
    ) -> Vec<DirectoryEntry> {
        let timeout = budget.clamp(self.lookup_timeout);
        let result = tokio::time::timeout(
            timeout,
            self.directory.find_lawyers(location, specialty, timeout),
        )
        .await;

        let mut entries = match result {
            Ok(Ok(entries)) => entries,
            Ok(Err(err)) => {
                tracing::warn!(error = %err, "directory lookup failed, continuing without entries");
                Vec::new()
            }
            Err(_) => {
                tracing::warn!("directory lookup timed out, continuing without entries");
                Vec::new()
            }
        };
        entries.truncate(MAX_DIRECTORY_ENTRIES);
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ManualClock, SessionId};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct StubAudit {
        result: Result<AuditPayload, ProviderError>,
        seen_timeouts: Mutex<Vec<Duration>>,
    }

    #[async_trait]
    impl AuditProvider for StubAudit {
        async fn run_audit(
            &self,
            _session: &IntakeSession,
            timeout: Duration,
        ) -> Result<AuditPayload, ProviderError> {
            self.seen_timeouts.lock().unwrap().push(timeout);
            self.result.clone()
        }
    }

    struct StubDirectory {
        result: Result<Vec<DirectoryEntry>, ProviderError>,
    }

    #[async_trait]
    impl DirectoryProvider for StubDirectory {
        async fn find_lawyers(
            &self,
            _location: &str,
            _specialty: &str,
            _timeout: Duration,
        ) -> Result<Vec<DirectoryEntry>, ProviderError> {
            self.result.clone()
        }
    }

    fn entry(name: &str) -> DirectoryEntry {
        DirectoryEntry {
            name: name.to_string(),
            specialty: "Droit du travail".to_string(),
            city: "Paris".to_string(),
            phone: None,
        }
    }

    fn session() -> IntakeSession {
        IntakeSession::new(SessionId::new("gw-test").unwrap())
    }

    fn budget_with_remaining(ms: u64) -> DeadlineBudget {
        let clock = Arc::new(ManualClock::new());
        DeadlineBudget::start_with_clock(
            Duration::from_millis(ms),
            Duration::from_millis(1000),
            clock,
        )
    }

    fn gateway(
        audit: Result<AuditPayload, ProviderError>,
        directory: Result<Vec<DirectoryEntry>, ProviderError>,
    ) -> (ProviderGateway, Arc<StubAudit>) {
        let audit = Arc::new(StubAudit {
            result: audit,
            seen_timeouts: Mutex::new(Vec::new()),
        });
        let gw = ProviderGateway::new(audit.clone(), Arc::new(StubDirectory { result: directory }));
        (gw, audit)
    }

    #[tokio::test]
    async fn audit_success_passes_payload_through() {
        let payload = AuditPayload {
            summary: Some("ok".into()),
            ..AuditPayload::default()
        };
        let (gw, _) = gateway(Ok(payload.clone()), Ok(vec![]));

        let outcome = gw.run_audit(&session(), &budget_with_remaining(8000)).await;
        assert_eq!(outcome.payload(), Some(&payload));
    }

    #[tokio::test]
    async fn audit_error_becomes_failure_outcome() {
        let (gw, _) = gateway(Err(ProviderError::NotConfigured), Ok(vec![]));
        let outcome = gw.run_audit(&session(), &budget_with_remaining(8000)).await;
        assert_eq!(
            outcome,
            ProviderOutcome::Failure(ProviderError::NotConfigured)
        );
    }

    #[tokio::test]
    async fn audit_timeout_is_capped_by_the_budget() {
        let (gw, audit) = gateway(Ok(AuditPayload::default()), Ok(vec![]));
        // only 2s remain, below the 5s provider default
        gw.run_audit(&session(), &budget_with_remaining(2000)).await;

        let seen = audit.seen_timeouts.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0] <= Duration::from_millis(2000));
    }

    #[tokio::test]
    async fn slow_audit_is_cut_off_by_the_gateway() {
        struct SlowAudit;

        #[async_trait]
        impl AuditProvider for SlowAudit {
            async fn run_audit(
                &self,
                _session: &IntakeSession,
                _timeout: Duration,
            ) -> Result<AuditPayload, ProviderError> {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(AuditPayload::default())
            }
        }

        tokio::time::pause();
        let gw = ProviderGateway::new(
            Arc::new(SlowAudit),
            Arc::new(StubDirectory { result: Ok(vec![]) }),
        );
        let outcome = gw.run_audit(&session(), &budget_with_remaining(8000)).await;
        assert_eq!(outcome, ProviderOutcome::Failure(ProviderError::Timeout));
    }

    #[tokio::test]
    async fn directory_errors_degrade_to_empty_list() {
        let (gw, _) = gateway(
            Ok(AuditPayload::default()),
            Err(ProviderError::Upstream("503".into())),
        );
        let entries = gw
            .find_lawyers("Paris", "Droit du travail", &budget_with_remaining(8000))
            .await;
        assert!(entries.is_empty());
    }

    #[tokio::test]
    async fn directory_results_are_truncated() {
        let (gw, _) = gateway(
            Ok(AuditPayload::default()),
            Ok(vec![entry("a"), entry("b"), entry("c"), entry("d"), entry("e")]),
        );
        let entries = gw
            .find_lawyers("Paris", "Droit du travail", &budget_with_remaining(8000))
            .await;
        assert_eq!(entries.len(), MAX_DIRECTORY_ENTRIES);
    }
}
