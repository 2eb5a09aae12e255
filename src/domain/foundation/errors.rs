//! Caller-facing error taxonomy for the intake pipeline.
//!
//! Only input errors live here. Provider trouble is never surfaced as an
//! error: the analysis layer degrades it into a default-filled result.

use thiserror::Error;

use super::SessionId;

/// Errors reported back to the caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IntakeError {
    /// The referenced question id is not part of the catalog.
    #[error("unknown question: {0}")]
    UnknownQuestion(String),

    /// The answer value does not match the question kind.
    #[error("answer for {question} has the wrong shape: expected {expected}")]
    TypeMismatch {
        question: String,
        expected: &'static str,
    },

    /// A validation rule was not met.
    #[error("invalid value for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// The referenced session does not exist.
    #[error("session not found: {0}")]
    SessionNotFound(SessionId),

    /// The analysis request lacks the caller-facing minimum input.
    #[error("intake incomplete: {reason}")]
    IncompleteIntake { reason: String },
}

impl IntakeError {
    /// Creates a validation error for a named field.
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an incomplete-intake error.
    pub fn incomplete(reason: impl Into<String>) -> Self {
        Self::IncompleteIntake {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_names_the_field() {
        let err = IntakeError::validation("urgency", "must be between 1 and 10");
        assert_eq!(
            err.to_string(),
            "invalid value for urgency: must be between 1 and 10"
        );
    }

    #[test]
    fn incomplete_intake_carries_reason() {
        let err = IntakeError::incomplete("problem description too short");
        assert!(err.to_string().contains("too short"));
    }
}
