//! HTTP routes for intake endpoints.

use axum::{routing::post, Router};

use super::handlers::{record_answer, start_intake, submit_message, IntakeHandlers};

/// Creates the intake router with all endpoints.
pub fn intake_routes(handlers: IntakeHandlers) -> Router {
    Router::new()
        .route("/start", post(start_intake))
        .route("/:id/answer", post(record_answer))
        .route("/:id/message", post(submit_message))
        .with_state(handlers)
}
