//! RecordAnswerHandler - Command handler for answering one question.

use std::sync::Arc;

use crate::application::AppError;
use crate::domain::foundation::SessionId;
use crate::domain::intake::{AnswerValue, FlowController, IntakeSession, Question};
use crate::ports::SessionStore;

/// Command to record one answer.
#[derive(Debug, Clone)]
pub struct RecordAnswerCommand {
    pub session_id: SessionId,
    pub question_id: String,
    pub value: AnswerValue,
}

/// Result of recording an answer.
#[derive(Debug, Clone)]
pub struct RecordAnswerResult {
    pub next_question: Option<Question>,
    pub complete: bool,
    pub answered_count: usize,
}

/// Handler for recording answers.
pub struct RecordAnswerHandler {
    store: Arc<dyn SessionStore>,
    flow: FlowController,
}

impl RecordAnswerHandler {
    pub fn new(store: Arc<dyn SessionStore>, flow: FlowController) -> Self {
        Self { store, flow }
    }

    pub async fn handle(&self, cmd: RecordAnswerCommand) -> Result<RecordAnswerResult, AppError> {
        // Missing sessions are auto-created: the explicit start call is the
        // recommended path, this is the robustness fallback for clients
        // that lost the start response.
        let mut session = match self.store.get(&cmd.session_id).await? {
            Some(session) => session,
            None => {
                tracing::warn!(session = %cmd.session_id, "auto-creating session on first answer");
                IntakeSession::new(cmd.session_id.clone())
            }
        };

        self.flow
            .record_answer(&mut session, &cmd.question_id, cmd.value)?;
        self.store.put(session.clone()).await?;

        let next_question = self.flow.next_question(&session).cloned();
        let complete = next_question.is_none();

        Ok(RecordAnswerResult {
            next_question,
            complete,
            answered_count: session.answered_count(),
        })
    }
}
