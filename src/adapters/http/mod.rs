//! HTTP adapters - axum routers, DTOs, and middleware.

pub mod analysis;
pub mod error;
pub mod intake;
pub mod middleware;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::ports::RateLimiter;

use analysis::{analysis_routes, AnalysisHandlers};
use intake::{intake_routes, IntakeHandlers};
use middleware::rate_limit::rate_limit_middleware;

/// Assembles the API router: feature routers behind the rate-limit gate,
/// with tracing and CORS layers.
pub fn api_router(
    intake: IntakeHandlers,
    analysis: AnalysisHandlers,
    limiter: Arc<dyn RateLimiter>,
) -> Router {
    Router::new()
        .nest("/api/intake", intake_routes(intake))
        .nest("/api/analysis", analysis_routes(analysis))
        .layer(axum::middleware::from_fn_with_state(
            limiter,
            rate_limit_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
