//! Deterministic fallback values for the coalescer.
//!
//! These are product decisions, not engineering requirements, so they are
//! configuration with defaults rather than hard-coded logic. Deployments
//! override them through the `LEXFLOW__ANALYSIS__DEFAULTS__…` variables.

use serde::Deserialize;
use std::collections::HashMap;

use super::report::{Complexity, CostRange};

/// One keyword → specialty derivation rule.
#[derive(Debug, Clone, Deserialize)]
pub struct SpecialtyRule {
    /// Lower-cased keyword matched by containment against the category.
    pub keyword: String,
    pub specialty: String,
}

/// Fallbacks used whenever the audit payload is absent or unusable.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisDefaults {
    /// Urgency when neither the payload nor the answers provide one.
    pub urgency_midpoint: u8,
    /// Urgency at or above which a lawyer is recommended by default.
    pub lawyer_urgency_threshold: u8,
    /// Category when none was collected.
    pub generic_category: String,
    /// Specialty when no rule matches.
    pub generic_specialty: String,
    /// Generic checklist when the payload offers no actions.
    pub default_actions: Vec<String>,
    /// Next step when the payload offers none.
    pub default_next_step: String,
    /// Risks listed when the payload offers none.
    pub default_risks: Vec<String>,
    /// Urgency words recognized in free-text answers.
    pub urgency_labels: HashMap<String, u8>,
    /// Category-keyword → specialty rules, checked in order.
    pub specialty_rules: Vec<SpecialtyRule>,
    /// Cost bands by complexity.
    pub cost_low: CostRange,
    pub cost_medium: CostRange,
    pub cost_high: CostRange,
}

impl AnalysisDefaults {
    /// Cost band for a complexity level.
    pub fn cost_for(&self, complexity: Complexity) -> CostRange {
        match complexity {
            Complexity::Low => self.cost_low,
            Complexity::Medium => self.cost_medium,
            Complexity::High => self.cost_high,
        }
    }

    /// Specialty derived from a category string, first matching rule wins.
    pub fn specialty_for(&self, category: &str) -> String {
        let lowered = category.to_lowercase();
        self.specialty_rules
            .iter()
            .find(|rule| lowered.contains(&rule.keyword))
            .map(|rule| rule.specialty.clone())
            .unwrap_or_else(|| self.generic_specialty.clone())
    }

    /// Urgency score for a free-text label, if recognized.
    pub fn urgency_for_label(&self, text: &str) -> Option<u8> {
        let lowered = text.to_lowercase();
        self.urgency_labels
            .iter()
            .filter(|(label, _)| lowered.contains(label.as_str()))
            .map(|(_, score)| *score)
            .max()
    }
}

impl Default for AnalysisDefaults {
    fn default() -> Self {
        Self {
            urgency_midpoint: 5,
            lawyer_urgency_threshold: 7,
            generic_category: "Question juridique générale".to_string(),
            generic_specialty: "Droit généraliste".to_string(),
            default_actions: vec![
                "Rassembler tous les documents liés au litige".to_string(),
                "Adresser une mise en demeure écrite à la partie adverse".to_string(),
                "Consulter un professionnel du droit si la situation persiste".to_string(),
            ],
            default_next_step: "Constituer un dossier avec les pièces justificatives".to_string(),
            default_risks: vec![
                "Perte de droits en cas d'inaction prolongée".to_string(),
                "Délais de prescription applicables au litige".to_string(),
            ],
            urgency_labels: HashMap::from([
                ("très urgent".to_string(), 9),
                ("urgent".to_string(), 8),
                ("rapidement".to_string(), 7),
                ("bientôt".to_string(), 5),
                ("pas urgent".to_string(), 3),
            ]),
            specialty_rules: vec![
                SpecialtyRule {
                    keyword: "travail".to_string(),
                    specialty: "Droit du travail".to_string(),
                },
                SpecialtyRule {
                    keyword: "licenci".to_string(),
                    specialty: "Droit du travail".to_string(),
                },
                SpecialtyRule {
                    keyword: "salaire".to_string(),
                    specialty: "Droit du travail".to_string(),
                },
                SpecialtyRule {
                    keyword: "famille".to_string(),
                    specialty: "Droit de la famille".to_string(),
                },
                SpecialtyRule {
                    keyword: "divorce".to_string(),
                    specialty: "Droit de la famille".to_string(),
                },
                SpecialtyRule {
                    keyword: "immobilier".to_string(),
                    specialty: "Droit immobilier".to_string(),
                },
                SpecialtyRule {
                    keyword: "loyer".to_string(),
                    specialty: "Droit immobilier".to_string(),
                },
                SpecialtyRule {
                    keyword: "consommation".to_string(),
                    specialty: "Droit de la consommation".to_string(),
                },
                SpecialtyRule {
                    keyword: "affaires".to_string(),
                    specialty: "Droit des affaires".to_string(),
                },
                SpecialtyRule {
                    keyword: "pénal".to_string(),
                    specialty: "Droit pénal".to_string(),
                },
            ],
            cost_low: CostRange {
                min_eur: 90,
                max_eur: 400,
            },
            cost_medium: CostRange {
                min_eur: 400,
                max_eur: 1500,
            },
            cost_high: CostRange {
                min_eur: 1500,
                max_eur: 5000,
            },
        }
    }
}
