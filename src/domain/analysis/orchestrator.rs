//! Analysis orchestrator - one pass from answers to a complete report.
//!
//! The orchestrator never fails a well-formed request: provider trouble is
//! absorbed by the coalescer and reported as `partial`. The only errors it
//! returns are caller-input validation failures.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::foundation::{DeadlineBudget, IntakeError};
use crate::domain::intake::IntakeSession;
use crate::ports::TemplateLookup;

use super::coalescer::ResultCoalescer;
use super::gateway::{ProviderGateway, ProviderOutcome, SkipReason};
use super::report::AnalysisReport;

/// Per-step budget requirements.
#[derive(Debug, Clone, Copy)]
pub struct OrchestratorBudgets {
    /// Margin required before starting the audit call.
    pub audit_call: Duration,
    /// Margin required before starting the directory lookup.
    pub lookup_call: Duration,
    /// Minimum length of the free-text problem description.
    pub min_problem_chars: usize,
}

impl Default for OrchestratorBudgets {
    fn default() -> Self {
        Self {
            audit_call: Duration::from_millis(2000),
            lookup_call: Duration::from_millis(800),
            min_problem_chars: 20,
        }
    }
}

/// Input to one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub session: IntakeSession,
    /// Overrides the session's situation answer when present.
    pub problem: Option<String>,
    /// Overrides the session's location answer when present.
    pub location: Option<String>,
}

impl AnalysisRequest {
    /// The effective problem description: override first, then the
    /// situation answer.
    fn problem_statement(&self) -> Option<String> {
        self.problem
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(String::from)
            .or_else(|| self.session.answer("situation").map(|a| a.render()))
    }

    /// The effective location, if any.
    fn location(&self) -> Option<String> {
        self.location
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .or_else(|| {
                self.session
                    .answer("location")
                    .map(|a| a.render())
                    .filter(|l| !l.trim().is_empty())
            })
    }
}

/// Sequences gateway calls against the deadline budget and assembles the
/// final report.
pub struct AnalysisOrchestrator {
    gateway: ProviderGateway,
    coalescer: ResultCoalescer,
    templates: Arc<dyn TemplateLookup>,
    budgets: OrchestratorBudgets,
}

impl AnalysisOrchestrator {
    pub fn new(
        gateway: ProviderGateway,
        coalescer: ResultCoalescer,
        templates: Arc<dyn TemplateLookup>,
    ) -> Self {
        Self {
            gateway,
            coalescer,
            templates,
            budgets: OrchestratorBudgets::default(),
        }
    }

    /// Overrides the per-step budget requirements.
    pub fn with_budgets(mut self, budgets: OrchestratorBudgets) -> Self {
        self.budgets = budgets;
        self
    }

    /// Runs one analysis. Fails only on caller-input validation.
    pub async fn run(
        &self,
        request: AnalysisRequest,
        budget: &DeadlineBudget,
    ) -> Result<AnalysisReport, IntakeError> {
        // 1. Caller-facing minimum: a usable problem description.
        let problem = request.problem_statement().unwrap_or_default();
        if problem.chars().count() < self.budgets.min_problem_chars {
            return Err(IntakeError::incomplete(format!(
                "problem description must be at least {} characters",
                self.budgets.min_problem_chars
            )));
        }

        // 2. Audit, budget permitting.
        let audit_outcome = if budget.has_margin(self.budgets.audit_call) {
            self.gateway.run_audit(&request.session, budget).await
        } else {
            tracing::info!("skipping audit call: no time margin");
            ProviderOutcome::Skipped(SkipReason::NoTime)
        };

        // 3. Baseline analysis; always valid from here on.
        let analysis = self.coalescer.coalesce(&audit_outcome, &request.session);
        let mut partial = !audit_outcome.is_success();

        // 4. Directory lookup, when warranted and affordable.
        let location = request.location();
        let specialty = analysis.recommended_specialty.clone();
        let lawyers = match (&location, specialty.trim().is_empty()) {
            (Some(location), false) => {
                if budget.has_margin(self.budgets.lookup_call) {
                    let entries = self.gateway.find_lawyers(location, &specialty, budget).await;
                    if entries.is_empty() {
                        partial = true;
                    }
                    entries
                } else {
                    tracing::info!("skipping directory lookup: no time margin");
                    partial = true;
                    Vec::new()
                }
            }
            _ => Vec::new(),
        };

        // 5. Attach the template title when the id resolves.
        let template_title = match &analysis.recommended_template_id {
            Some(id) => self.templates.get_template(id).await.map(|t| t.title),
            None => None,
        };

        if budget.is_exhausted() {
            partial = true;
        }

        Ok(AnalysisReport {
            analysis,
            lawyers,
            template_title,
            partial,
        })
    }
}
