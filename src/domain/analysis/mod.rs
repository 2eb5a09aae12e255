//! Analysis - deadline-budgeted case diagnostics.
//!
//! The orchestrator sequences provider calls against the request budget,
//! the gateway bounds each call, and the coalescer guarantees a complete
//! result whatever the providers did.

mod coalescer;
mod defaults;
mod gateway;
mod orchestrator;
mod report;

pub use coalescer::ResultCoalescer;
pub use defaults::{AnalysisDefaults, SpecialtyRule};
pub use gateway::{ProviderGateway, ProviderOutcome, SkipReason};
pub use orchestrator::{AnalysisOrchestrator, AnalysisRequest, OrchestratorBudgets};
pub use report::{
    Analysis, AnalysisReport, AuditPayload, Complexity, CostRange, Diagnostic, DirectoryEntry,
};
