//! Result coalescer - a total merge of audit output and defaults.
//!
//! Whatever the audit provider returned (or failed to return), the
//! coalescer produces a complete [`Analysis`]. Every field is taken from
//! the payload when present and shape-valid, otherwise derived from the
//! collected answers, otherwise filled from the configured defaults.
//! This function must never panic.

use serde_json::Value;

use crate::domain::intake::IntakeSession;

use super::defaults::AnalysisDefaults;
use super::gateway::ProviderOutcome;
use super::report::{Analysis, AuditPayload, Complexity, CostRange, Diagnostic};

/// Merges a possibly partial or absent audit payload with deterministic
/// defaults derived from the answers.
#[derive(Debug, Clone)]
pub struct ResultCoalescer {
    defaults: AnalysisDefaults,
}

impl ResultCoalescer {
    pub fn new(defaults: AnalysisDefaults) -> Self {
        Self { defaults }
    }

    /// Produces a complete analysis from whatever is available.
    pub fn coalesce(
        &self,
        outcome: &ProviderOutcome<AuditPayload>,
        session: &IntakeSession,
    ) -> Analysis {
        let empty = AuditPayload::default();
        let payload = outcome.payload().unwrap_or(&empty);

        let category = self.category(payload, session);
        let urgency = self.urgency(payload, session);
        let complexity = self.complexity(payload, urgency);
        let actions = self.actions(payload);
        let needs_lawyer = self.needs_lawyer(payload, urgency);
        let recommended_specialty = self.specialty(payload, &category);
        let recommended_template_id = non_empty(payload.recommended_template_id.as_deref());
        let problem_statement = self.problem_statement(payload, session);
        let summary = self.summary(payload, &category, urgency);
        let risks = self.risks(payload);
        let estimated_cost = self.cost(payload, complexity);
        let next_step = non_empty(payload.next_step.as_deref())
            .unwrap_or_else(|| self.defaults.default_next_step.clone());

        Analysis {
            summary,
            category,
            urgency,
            complexity,
            actions,
            needs_lawyer,
            recommended_specialty,
            recommended_template_id,
            diagnostic: Diagnostic {
                problem_statement,
                risks,
                estimated_cost,
                next_step,
            },
        }
    }

    fn category(&self, payload: &AuditPayload, session: &IntakeSession) -> String {
        non_empty(payload.category.as_deref())
            .or_else(|| session.answer("category").map(|a| a.render()))
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| self.defaults.generic_category.clone())
    }

    fn urgency(&self, payload: &AuditPayload, session: &IntakeSession) -> u8 {
        if let Some(urgency) = payload.urgency.as_ref().and_then(parse_urgency) {
            return urgency;
        }
        if let Some(answer) = session.answer("urgency") {
            if let Some(n) = answer.as_number() {
                return clamp_urgency(n);
            }
            // coarse text captures may still carry an urgency word
            if let Some(score) = self.defaults.urgency_for_label(&answer.render()) {
                return score;
            }
        }
        self.defaults.urgency_midpoint.clamp(1, 10)
    }

    fn complexity(&self, payload: &AuditPayload, urgency: u8) -> Complexity {
        payload
            .complexity
            .as_deref()
            .and_then(Complexity::parse)
            .unwrap_or(match urgency {
                8..=10 => Complexity::High,
                5..=7 => Complexity::Medium,
                _ => Complexity::Low,
            })
    }

    fn actions(&self, payload: &AuditPayload) -> Vec<String> {
        let from_payload: Vec<String> = match payload.actions.as_ref() {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|v| v.as_str())
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
            _ => Vec::new(),
        };
        if from_payload.is_empty() {
            self.defaults.default_actions.clone()
        } else {
            from_payload
        }
    }

    fn needs_lawyer(&self, payload: &AuditPayload, urgency: u8) -> bool {
        match payload.needs_lawyer.as_ref() {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => match s.trim().to_lowercase().as_str() {
                "true" | "oui" | "yes" => true,
                "false" | "non" | "no" => false,
                _ => urgency >= self.defaults.lawyer_urgency_threshold,
            },
            _ => urgency >= self.defaults.lawyer_urgency_threshold,
        }
    }

    fn specialty(&self, payload: &AuditPayload, category: &str) -> String {
        non_empty(payload.recommended_specialty.as_deref())
            .unwrap_or_else(|| self.defaults.specialty_for(category))
    }

    fn problem_statement(&self, payload: &AuditPayload, session: &IntakeSession) -> String {
        non_empty(payload.problem_statement.as_deref())
            .or_else(|| session.answer("situation").map(|a| a.render()))
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "Situation non détaillée par le demandeur".to_string())
    }

    fn summary(&self, payload: &AuditPayload, category: &str, urgency: u8) -> String {
        non_empty(payload.summary.as_deref()).unwrap_or_else(|| {
            format!(
                "Demande classée en {} avec une urgence estimée à {}/10.",
                category, urgency
            )
        })
    }

    fn risks(&self, payload: &AuditPayload) -> Vec<String> {
        let from_payload: Vec<String> = match payload.risks.as_ref() {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|v| v.as_str())
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect(),
            _ => Vec::new(),
        };
        if from_payload.is_empty() {
            self.defaults.default_risks.clone()
        } else {
            from_payload
        }
    }

    fn cost(&self, payload: &AuditPayload, complexity: Complexity) -> CostRange {
        let min = payload
            .estimated_cost_min_eur
            .as_ref()
            .and_then(parse_cost);
        let max = payload
            .estimated_cost_max_eur
            .as_ref()
            .and_then(parse_cost);
        match (min, max) {
            (Some(min), Some(max)) if min <= max => CostRange {
                min_eur: min,
                max_eur: max,
            },
            _ => self.defaults.cost_for(complexity),
        }
    }
}

/// Urgency from a JSON value: a number, or a numeric string.
fn parse_urgency(value: &Value) -> Option<u8> {
    match value {
        Value::Number(n) => n.as_f64().map(clamp_urgency),
        Value::String(s) => s.trim().parse::<f64>().ok().map(clamp_urgency),
        _ => None,
    }
}

fn clamp_urgency(n: f64) -> u8 {
    if n.is_nan() {
        return 1;
    }
    (n.round().clamp(1.0, 10.0)) as u8
}

/// Cost from a JSON value: a non-negative number or numeric string.
fn parse_cost(value: &Value) -> Option<u32> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if n.is_finite() && (0.0..=10_000_000.0).contains(&n) {
        Some(n.round() as u32)
    } else {
        None
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}
