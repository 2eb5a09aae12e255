//! HTTP handlers for the analysis endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::adapters::http::error::ApiError;
use crate::application::handlers::{RunAnalysisCommand, RunAnalysisHandler};
use crate::domain::foundation::SessionId;

use super::dto::{AnalyzeRequest, AnalyzeResponse};

/// Injected state for the analysis routes.
#[derive(Clone)]
pub struct AnalysisHandlers {
    pub run: Arc<RunAnalysisHandler>,
}

/// POST /api/analysis
pub async fn run_analysis(
    State(handlers): State<AnalysisHandlers>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let session_id = request
        .session_id
        .map(SessionId::new)
        .transpose()?;

    let report = handlers
        .run
        .handle(RunAnalysisCommand {
            session_id,
            problem: request.problem,
            location: request.location,
        })
        .await?;

    Ok(Json(AnalyzeResponse::from(report)))
}
