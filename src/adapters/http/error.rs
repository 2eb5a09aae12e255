//! HTTP error mapping for application errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::application::AppError;
use crate::domain::foundation::IntakeError;

/// Response-side wrapper turning [`AppError`] into a JSON error body.
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<IntakeError> for ApiError {
    fn from(err: IntakeError) -> Self {
        Self(AppError::Intake(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self.0 {
            AppError::Intake(intake) => match intake {
                IntakeError::SessionNotFound(_) => (StatusCode::NOT_FOUND, "SESSION_NOT_FOUND"),
                IntakeError::UnknownQuestion(_) => (StatusCode::NOT_FOUND, "UNKNOWN_QUESTION"),
                IntakeError::IncompleteIntake { .. } => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "INCOMPLETE_INTAKE")
                }
                IntakeError::TypeMismatch { .. } | IntakeError::Validation { .. } => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_FAILED")
                }
            },
            AppError::Store(_) => (StatusCode::SERVICE_UNAVAILABLE, "STORE_UNAVAILABLE"),
        };

        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }

        (
            status,
            Json(serde_json::json!({
                "error": self.0.to_string(),
                "code": code,
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_400() {
        let err = ApiError::from(IntakeError::validation("urgency", "out of range"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn incomplete_intake_maps_to_422() {
        let err = ApiError::from(IntakeError::incomplete("too short"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn unknown_question_maps_to_404() {
        let err = ApiError::from(IntakeError::UnknownQuestion("nope".into()));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
