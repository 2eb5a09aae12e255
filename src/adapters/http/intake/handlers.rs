//! HTTP handlers for the intake endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use crate::adapters::http::error::ApiError;
use crate::application::handlers::{
    RecordAnswerCommand, RecordAnswerHandler, StartIntakeCommand, StartIntakeHandler,
    SubmitMessageCommand, SubmitMessageHandler,
};
use crate::domain::foundation::SessionId;

use super::dto::{
    AnswerRequest, IntakeStepResponse, MessageRequest, QuestionDto, StartIntakeRequest,
    StartIntakeResponse,
};

/// Injected state for the intake routes.
#[derive(Clone)]
pub struct IntakeHandlers {
    pub start: Arc<StartIntakeHandler>,
    pub answer: Arc<RecordAnswerHandler>,
    pub message: Arc<SubmitMessageHandler>,
}

/// POST /api/intake/start
pub async fn start_intake(
    State(handlers): State<IntakeHandlers>,
    Json(request): Json<StartIntakeRequest>,
) -> Result<Json<StartIntakeResponse>, ApiError> {
    let session_id = request
        .session_id
        .map(SessionId::new)
        .transpose()?;

    let result = handlers
        .start
        .handle(StartIntakeCommand { session_id })
        .await?;

    Ok(Json(StartIntakeResponse {
        session_id: result.session_id.to_string(),
        question: result.first_question.as_ref().map(QuestionDto::from),
        total_questions: result.total_questions,
    }))
}

/// POST /api/intake/:id/answer
pub async fn record_answer(
    State(handlers): State<IntakeHandlers>,
    Path(session_id): Path<String>,
    Json(request): Json<AnswerRequest>,
) -> Result<Json<IntakeStepResponse>, ApiError> {
    let session_id = SessionId::new(session_id)?;

    let result = handlers
        .answer
        .handle(RecordAnswerCommand {
            session_id,
            question_id: request.question_id,
            value: request.value,
        })
        .await?;

    Ok(Json(IntakeStepResponse {
        question: result.next_question.as_ref().map(QuestionDto::from),
        complete: result.complete,
        answered_count: result.answered_count,
    }))
}

/// POST /api/intake/:id/message
pub async fn submit_message(
    State(handlers): State<IntakeHandlers>,
    Path(session_id): Path<String>,
    Json(request): Json<MessageRequest>,
) -> Result<Json<IntakeStepResponse>, ApiError> {
    let session_id = SessionId::new(session_id)?;

    let result = handlers
        .message
        .handle(SubmitMessageCommand {
            session_id,
            message: request.message,
        })
        .await?;

    Ok(Json(IntakeStepResponse {
        question: result.next_question.as_ref().map(QuestionDto::from),
        complete: result.complete,
        answered_count: result.answered_count,
    }))
}
