//! Request/response DTOs for the intake endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::intake::{AnswerValue, Question};

/// Request body for starting a session.
#[derive(Debug, Default, Deserialize)]
pub struct StartIntakeRequest {
    /// Caller-supplied session id; generated server-side when absent.
    #[serde(default)]
    pub session_id: Option<String>,
}

/// One catalog question, as shown to the client.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionDto {
    pub id: String,
    pub text: String,
    pub kind: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl From<&Question> for QuestionDto {
    fn from(question: &Question) -> Self {
        Self {
            id: question.id.clone(),
            text: question.text.clone(),
            kind: question.kind.as_str().to_string(),
            options: question.options.clone(),
        }
    }
}

/// Response for the start endpoint.
#[derive(Debug, Serialize)]
pub struct StartIntakeResponse {
    pub session_id: String,
    pub question: Option<QuestionDto>,
    pub total_questions: usize,
}

/// Request body for answering one question.
#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub question_id: String,
    pub value: AnswerValue,
}

/// Request body for a freeform message.
#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub message: String,
}

/// Response after an answer or a message: where the intake stands.
#[derive(Debug, Serialize)]
pub struct IntakeStepResponse {
    pub question: Option<QuestionDto>,
    pub complete: bool,
    pub answered_count: usize,
}
