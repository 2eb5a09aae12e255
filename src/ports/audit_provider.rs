//! Audit provider port - structured legal diagnostics from a model.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::analysis::AuditPayload;
use crate::domain::intake::IntakeSession;

use super::ProviderError;

/// Port for the structured-audit provider.
///
/// Implementations send the collected answer set to a language model whose
/// instructions demand a single JSON object, tolerate prose around that
/// object, and apply a repair pass before giving up on parsing. The
/// `timeout` is a hard client-side bound; implementations must not block
/// past it.
#[async_trait]
pub trait AuditProvider: Send + Sync {
    /// Runs one audit over the session's answers.
    async fn run_audit(
        &self,
        session: &IntakeSession,
        timeout: Duration,
    ) -> Result<AuditPayload, ProviderError>;
}
