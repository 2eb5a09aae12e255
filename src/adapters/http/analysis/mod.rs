//! Analysis HTTP endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{AnalyzeRequest, AnalyzeResponse};
pub use handlers::AnalysisHandlers;
pub use routes::analysis_routes;
