//! Analysis result shapes.

use serde::{Deserialize, Serialize};

/// How involved the case is likely to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Complexity {
    Low,
    Medium,
    High,
}

impl Complexity {
    /// Loose parser accepting English and French labels.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "low" | "faible" | "simple" => Some(Complexity::Low),
            "medium" | "moyen" | "moyenne" | "modéré" | "modérée" => Some(Complexity::Medium),
            "high" | "élevé" | "élevée" | "complexe" => Some(Complexity::High),
            _ => None,
        }
    }
}

/// Estimated cost range in euros.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostRange {
    pub min_eur: u32,
    pub max_eur: u32,
}

/// Extended diagnostic block attached to every analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub problem_statement: String,
    pub risks: Vec<String>,
    pub estimated_cost: CostRange,
    pub next_step: String,
}

/// Complete case analysis. Every field is always populated;
/// `recommended_template_id` is the only nullable one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub summary: String,
    pub category: String,
    /// 1-10.
    pub urgency: u8,
    pub complexity: Complexity,
    /// Never empty.
    pub actions: Vec<String>,
    pub needs_lawyer: bool,
    pub recommended_specialty: String,
    pub recommended_template_id: Option<String>,
    pub diagnostic: Diagnostic,
}

impl Analysis {
    /// Checks the structural invariants the pipeline promises callers.
    pub fn is_well_formed(&self) -> bool {
        !self.summary.trim().is_empty()
            && !self.category.trim().is_empty()
            && (1..=10).contains(&self.urgency)
            && !self.actions.is_empty()
            && self.actions.iter().all(|a| !a.trim().is_empty())
            && !self.recommended_specialty.trim().is_empty()
            && !self.diagnostic.problem_statement.trim().is_empty()
            && !self.diagnostic.next_step.trim().is_empty()
            && self.diagnostic.estimated_cost.min_eur <= self.diagnostic.estimated_cost.max_eur
    }
}

/// One lawyer-directory hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub name: String,
    pub specialty: String,
    pub city: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Final response assembled by the orchestrator.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub analysis: Analysis,
    /// Directory hits; empty when no lookup was warranted or it failed.
    pub lawyers: Vec<DirectoryEntry>,
    /// Title of the recommended template, when the id resolved.
    pub template_title: Option<String>,
    /// True when enrichment was incomplete (provider failure or no time).
    pub partial: bool,
}

/// Raw audit-provider output, deliberately lenient.
///
/// Every field is optional and scalar-ish fields arrive as raw JSON
/// values; the coalescer validates each one and substitutes defaults.
/// Deserialization only fails when the payload is not a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditPayload {
    pub summary: Option<String>,
    pub category: Option<String>,
    pub urgency: Option<serde_json::Value>,
    pub complexity: Option<String>,
    pub actions: Option<serde_json::Value>,
    pub needs_lawyer: Option<serde_json::Value>,
    pub recommended_specialty: Option<String>,
    pub recommended_template_id: Option<String>,
    pub problem_statement: Option<String>,
    pub risks: Option<serde_json::Value>,
    pub estimated_cost_min_eur: Option<serde_json::Value>,
    pub estimated_cost_max_eur: Option<serde_json::Value>,
    pub next_step: Option<String>,
}
