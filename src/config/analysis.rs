//! Analysis pipeline configuration (deadline budget and fallbacks).

use serde::Deserialize;
use std::time::Duration;

use crate::domain::analysis::AnalysisDefaults;

use super::error::ValidationError;

/// Timing and fallback configuration for the analysis pipeline.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Wall-clock window for one end-to-end analysis request.
    pub deadline_window_ms: u64,
    /// Remaining time under which no new provider call starts.
    pub guard_threshold_ms: u64,
    /// Margin required before the audit call.
    pub audit_call_budget_ms: u64,
    /// Margin required before the directory lookup.
    pub lookup_call_budget_ms: u64,
    /// Budget for the model-assisted extraction pass.
    pub extract_pass_budget_ms: u64,
    /// Minimum length of the free-text problem description.
    pub min_problem_chars: usize,
    /// Deterministic fallback values for the coalescer.
    pub defaults: AnalysisDefaults,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            deadline_window_ms: 8000,
            guard_threshold_ms: 1000,
            audit_call_budget_ms: 2000,
            lookup_call_budget_ms: 800,
            extract_pass_budget_ms: 1500,
            min_problem_chars: 20,
            defaults: AnalysisDefaults::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn deadline_window(&self) -> Duration {
        Duration::from_millis(self.deadline_window_ms)
    }

    pub fn guard_threshold(&self) -> Duration {
        Duration::from_millis(self.guard_threshold_ms)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.deadline_window_ms == 0 {
            return Err(ValidationError::new(
                "analysis.deadline_window_ms",
                "must be positive",
            ));
        }
        if self.guard_threshold_ms >= self.deadline_window_ms {
            return Err(ValidationError::new(
                "analysis.guard_threshold_ms",
                "must be smaller than the deadline window",
            ));
        }
        if self.audit_call_budget_ms >= self.deadline_window_ms {
            return Err(ValidationError::new(
                "analysis.audit_call_budget_ms",
                "must be smaller than the deadline window",
            ));
        }
        if self.min_problem_chars == 0 {
            return Err(ValidationError::new(
                "analysis.min_problem_chars",
                "must be positive",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(AnalysisConfig::default().validate().is_ok());
    }

    #[test]
    fn guard_must_fit_inside_the_window() {
        let config = AnalysisConfig {
            deadline_window_ms: 1000,
            guard_threshold_ms: 1000,
            ..AnalysisConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn durations_convert_from_millis() {
        let config = AnalysisConfig::default();
        assert_eq!(config.deadline_window(), Duration::from_millis(8000));
        assert_eq!(config.guard_threshold(), Duration::from_millis(1000));
    }
}
