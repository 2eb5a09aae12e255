//! HTTP routes for the analysis endpoint.

use axum::{routing::post, Router};

use super::handlers::{run_analysis, AnalysisHandlers};

/// Creates the analysis router.
pub fn analysis_routes(handlers: AnalysisHandlers) -> Router {
    Router::new()
        .route("/", post(run_analysis))
        .with_state(handlers)
}
