//! SubmitMessageHandler - Command handler for freeform user messages.
//!
//! A freeform message is mined for answers rather than recorded against
//! one question: it becomes the situation statement when none exists,
//! then both extractor passes enrich whatever else is still unanswered.

use std::sync::Arc;
use std::time::Duration;

use crate::application::AppError;
use crate::domain::foundation::{DeadlineBudget, SessionId};
use crate::domain::intake::{AnswerValue, FlowController, FreeformExtractor, IntakeSession, Question};
use crate::ports::SessionStore;

/// Command carrying one freeform message.
#[derive(Debug, Clone)]
pub struct SubmitMessageCommand {
    pub session_id: SessionId,
    pub message: String,
}

/// Result of processing a freeform message.
#[derive(Debug, Clone)]
pub struct SubmitMessageResult {
    pub next_question: Option<Question>,
    pub complete: bool,
    pub answered_count: usize,
}

/// Handler for freeform messages.
pub struct SubmitMessageHandler {
    store: Arc<dyn SessionStore>,
    flow: FlowController,
    extractor: Arc<FreeformExtractor>,
    /// Window/guard for the per-request budget bounding the model pass.
    window: Duration,
    guard: Duration,
}

impl SubmitMessageHandler {
    pub fn new(
        store: Arc<dyn SessionStore>,
        flow: FlowController,
        extractor: Arc<FreeformExtractor>,
        window: Duration,
        guard: Duration,
    ) -> Self {
        Self {
            store,
            flow,
            extractor,
            window,
            guard,
        }
    }

    pub async fn handle(&self, cmd: SubmitMessageCommand) -> Result<SubmitMessageResult, AppError> {
        // Same auto-creation fallback as RecordAnswerHandler.
        let mut session = match self.store.get(&cmd.session_id).await? {
            Some(session) => session,
            None => {
                tracing::warn!(session = %cmd.session_id, "auto-creating session on first message");
                IntakeSession::new(cmd.session_id.clone())
            }
        };

        let message = cmd.message.trim();
        if !message.is_empty() {
            session.fill_if_absent("situation", AnswerValue::Text(message.to_string()));

            let budget = DeadlineBudget::start(self.window, self.guard);
            self.extractor.enrich(&mut session, message, &budget).await;
        }

        self.store.put(session.clone()).await?;

        let next_question = self.flow.next_question(&session).cloned();
        let complete = next_question.is_none();

        Ok(SubmitMessageResult {
            next_question,
            complete,
            answered_count: session.answered_count(),
        })
    }
}
