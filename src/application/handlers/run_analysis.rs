//! RunAnalysisHandler - Command handler for the analysis pipeline.

use std::sync::Arc;
use std::time::Duration;

use crate::application::AppError;
use crate::domain::analysis::{AnalysisOrchestrator, AnalysisReport, AnalysisRequest};
use crate::domain::foundation::{DeadlineBudget, SessionId};
use crate::domain::intake::IntakeSession;
use crate::ports::SessionStore;

/// Command to run one analysis.
#[derive(Debug, Clone, Default)]
pub struct RunAnalysisCommand {
    /// Intake session to analyze; optional for one-shot requests that
    /// bring their own problem description.
    pub session_id: Option<SessionId>,
    /// Problem description override.
    pub problem: Option<String>,
    /// Location override for the directory lookup.
    pub location: Option<String>,
}

/// Handler running the analysis orchestrator under a fresh budget.
pub struct RunAnalysisHandler {
    store: Arc<dyn SessionStore>,
    orchestrator: Arc<AnalysisOrchestrator>,
    window: Duration,
    guard: Duration,
}

impl RunAnalysisHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        orchestrator: Arc<AnalysisOrchestrator>,
        window: Duration,
        guard: Duration,
    ) -> Self {
        Self {
            store,
            orchestrator,
            window,
            guard,
        }
    }

    pub async fn handle(&self, cmd: RunAnalysisCommand) -> Result<AnalysisReport, AppError> {
        // An unknown session is treated as an empty answer set: without a
        // problem override it then fails the minimum-length validation,
        // which is the error the caller should see.
        let session = match &cmd.session_id {
            Some(id) => match self.store.get(id).await? {
                Some(session) => session,
                None => {
                    tracing::warn!(session = %id, "analysis requested for unknown session");
                    IntakeSession::new(id.clone())
                }
            },
            None => IntakeSession::new(SessionId::generate()),
        };

        let budget = DeadlineBudget::start(self.window, self.guard);
        let report = self
            .orchestrator
            .run(
                AnalysisRequest {
                    session,
                    problem: cmd.problem,
                    location: cmd.location,
                },
                &budget,
            )
            .await?;

        tracing::info!(
            partial = report.partial,
            category = %report.analysis.category,
            urgency = report.analysis.urgency,
            "analysis completed"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAuditProvider;
    use crate::adapters::directory::MockDirectoryProvider;
    use crate::adapters::session::InMemorySessionStore;
    use crate::adapters::templates::StaticTemplateCatalog;
    use crate::domain::analysis::{
        AnalysisDefaults, AuditPayload, ProviderGateway, ResultCoalescer,
    };
    use crate::domain::foundation::IntakeError;
    use crate::domain::intake::AnswerValue;
    use crate::ports::ProviderError;
    use serde_json::json;

    fn handler_with(
        audit: MockAuditProvider,
        store: Arc<InMemorySessionStore>,
    ) -> RunAnalysisHandler {
        let gateway = ProviderGateway::new(
            Arc::new(audit),
            Arc::new(MockDirectoryProvider::returning(vec![])),
        );
        let orchestrator = AnalysisOrchestrator::new(
            gateway,
            ResultCoalescer::new(AnalysisDefaults::default()),
            Arc::new(StaticTemplateCatalog::builtin()),
        );
        RunAnalysisHandler::new(
            store,
            Arc::new(orchestrator),
            Duration::from_millis(8000),
            Duration::from_millis(1000),
        )
    }

    async fn stored_session(store: &Arc<InMemorySessionStore>) -> SessionId {
        let id = SessionId::new("analyzed").unwrap();
        let mut session = IntakeSession::new(id.clone());
        session.set_answer(
            "situation",
            AnswerValue::Text("Mon employeur ne me paie pas mes heures supplémentaires".into()),
        );
        session.set_answer("category", AnswerValue::Choice("Droit du travail".into()));
        session.set_answer("urgency", AnswerValue::Number(8.0));
        store.put(session).await.unwrap();
        id
    }

    #[tokio::test]
    async fn analyzes_a_stored_session() {
        let store = Arc::new(InMemorySessionStore::new());
        let id = stored_session(&store).await;
        let handler = handler_with(
            MockAuditProvider::returning(AuditPayload {
                urgency: Some(json!(8)),
                needs_lawyer: Some(json!(true)),
                ..AuditPayload::default()
            }),
            store,
        );

        let report = handler
            .handle(RunAnalysisCommand {
                session_id: Some(id),
                problem: None,
                location: None,
            })
            .await
            .unwrap();

        assert_eq!(report.analysis.urgency, 8);
        assert!(report.analysis.needs_lawyer);
        assert!(report.analysis.is_well_formed());
    }

    #[tokio::test]
    async fn unknown_session_without_problem_is_incomplete() {
        let store = Arc::new(InMemorySessionStore::new());
        let handler = handler_with(
            MockAuditProvider::returning(AuditPayload::default()),
            store,
        );

        let err = handler
            .handle(RunAnalysisCommand {
                session_id: Some(SessionId::new("ghost").unwrap()),
                problem: None,
                location: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::Intake(IntakeError::IncompleteIntake { .. })
        ));
    }

    #[tokio::test]
    async fn one_shot_request_with_problem_succeeds_degraded() {
        let store = Arc::new(InMemorySessionStore::new());
        let handler = handler_with(MockAuditProvider::failing(ProviderError::Timeout), store);

        let report = handler
            .handle(RunAnalysisCommand {
                session_id: None,
                problem: Some("Mon bailleur refuse de restituer mon dépôt de garantie".into()),
                location: None,
            })
            .await
            .unwrap();

        assert!(report.partial);
        assert!(report.analysis.is_well_formed());
    }
}
