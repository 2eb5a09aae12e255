//! Intake session - one caller's accumulated answers.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SessionId, Timestamp};

/// A recorded answer. The shape follows the question kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum AnswerValue {
    Text(String),
    Number(f64),
    Choice(String),
    MultiChoice(Vec<String>),
    Date(NaiveDate),
}

impl AnswerValue {
    /// Whether the answer carries no usable content.
    pub fn is_empty(&self) -> bool {
        match self {
            AnswerValue::Text(s) | AnswerValue::Choice(s) => s.trim().is_empty(),
            AnswerValue::MultiChoice(items) => items.is_empty(),
            AnswerValue::Number(_) | AnswerValue::Date(_) => false,
        }
    }

    /// Renders the answer as one display string.
    pub fn render(&self) -> String {
        match self {
            AnswerValue::Text(s) | AnswerValue::Choice(s) => s.clone(),
            AnswerValue::Number(n) => {
                if n.fract() == 0.0 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            AnswerValue::MultiChoice(items) => items.join(", "),
            AnswerValue::Date(d) => d.format("%Y-%m-%d").to_string(),
        }
    }

    /// Renders the answer as individual values for predicate matching.
    pub fn rendered_values(&self) -> Vec<String> {
        match self {
            AnswerValue::MultiChoice(items) => items.clone(),
            other => vec![other.render()],
        }
    }

    /// Extracts a numeric value, parsing text answers if possible.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            AnswerValue::Number(n) => Some(*n),
            AnswerValue::Text(s) | AnswerValue::Choice(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// One in-progress intake, keyed by session id.
///
/// Direct answers (flow controller) may overwrite; extractor writes go
/// through [`IntakeSession::fill_if_absent`] and never do.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeSession {
    id: SessionId,
    answers: HashMap<String, AnswerValue>,
    created_at: Timestamp,
}

impl IntakeSession {
    /// Creates an empty session.
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            answers: HashMap::new(),
            created_at: Timestamp::now(),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns the recorded answer for a question, if any.
    pub fn answer(&self, question_id: &str) -> Option<&AnswerValue> {
        self.answers.get(question_id)
    }

    pub fn has_answer(&self, question_id: &str) -> bool {
        self.answers.contains_key(question_id)
    }

    /// Number of recorded answers.
    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    /// All recorded answers.
    pub fn answers(&self) -> &HashMap<String, AnswerValue> {
        &self.answers
    }

    /// Records an answer, overwriting any previous value.
    pub fn set_answer(&mut self, question_id: impl Into<String>, value: AnswerValue) {
        self.answers.insert(question_id.into(), value);
    }

    /// Records an answer only when the question is still unanswered.
    ///
    /// Returns true when the value was written.
    pub fn fill_if_absent(&mut self, question_id: &str, value: AnswerValue) -> bool {
        if self.answers.contains_key(question_id) {
            return false;
        }
        self.answers.insert(question_id.to_string(), value);
        true
    }
}
