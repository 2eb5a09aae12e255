//! StartIntakeHandler - Command handler for opening an intake session.

use std::sync::Arc;

use crate::application::AppError;
use crate::domain::foundation::SessionId;
use crate::domain::intake::{FlowController, IntakeSession, Question};
use crate::ports::SessionStore;

/// Command to start an intake session.
#[derive(Debug, Clone, Default)]
pub struct StartIntakeCommand {
    /// Caller-supplied id; the server generates one when absent.
    pub session_id: Option<SessionId>,
}

/// Result of starting an intake session.
#[derive(Debug, Clone)]
pub struct StartIntakeResult {
    pub session_id: SessionId,
    pub first_question: Option<Question>,
    pub total_questions: usize,
}

/// Handler for starting intake sessions.
pub struct StartIntakeHandler {
    store: Arc<dyn SessionStore>,
    flow: FlowController,
}

impl StartIntakeHandler {
    pub fn new(store: Arc<dyn SessionStore>, flow: FlowController) -> Self {
        Self { store, flow }
    }

    pub async fn handle(&self, cmd: StartIntakeCommand) -> Result<StartIntakeResult, AppError> {
        let session_id = cmd.session_id.unwrap_or_else(SessionId::generate);

        // Starting an existing session resumes it rather than wiping it.
        let session = match self.store.get(&session_id).await? {
            Some(existing) => existing,
            None => {
                let session = IntakeSession::new(session_id.clone());
                self.store.put(session.clone()).await?;
                session
            }
        };

        let first_question = self.flow.next_question(&session).cloned();

        tracing::info!(session = %session_id, "intake session started");

        Ok(StartIntakeResult {
            session_id,
            first_question,
            total_questions: self.flow.catalog().len(),
        })
    }
}
