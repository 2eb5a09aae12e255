//! Request/response DTOs for the analysis endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::analysis::{Analysis, AnalysisReport, DirectoryEntry};

/// Request body for running an analysis.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AnalyzeRequest {
    /// Intake session to analyze.
    pub session_id: Option<String>,
    /// Problem description override for one-shot requests.
    pub problem: Option<String>,
    /// Location override for the directory lookup.
    pub location: Option<String>,
}

/// Response body: the complete analysis plus enrichment.
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub analysis: Analysis,
    pub lawyers: Vec<DirectoryEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_title: Option<String>,
    pub partial: bool,
}

impl From<AnalysisReport> for AnalyzeResponse {
    fn from(report: AnalysisReport) -> Self {
        Self {
            analysis: report.analysis,
            lawyers: report.lawyers,
            template_title: report.template_title,
            partial: report.partial,
        }
    }
}
