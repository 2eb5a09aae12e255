//! Question catalog - the ordered, process-wide list of intake questions.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use once_cell::sync::Lazy;
use thiserror::Error;

use super::question::{Question, QuestionKind, ValidationRule, Visibility};

/// Errors raised while assembling a catalog.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate question id: {0}")]
    DuplicateId(String),

    #[error("question {question} depends on unknown question {depends_on}")]
    UnknownDependency { question: String, depends_on: String },

    #[error("question {0} has options but is not a choice question")]
    UnexpectedOptions(String),

    #[error("choice question {0} has no options")]
    MissingOptions(String),
}

/// Ordered, immutable question list. Built once at startup.
#[derive(Debug)]
pub struct Catalog {
    questions: Vec<Question>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    /// Builds a catalog, checking id uniqueness, dependency resolution,
    /// and option/kind consistency.
    pub fn new(questions: Vec<Question>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for q in &questions {
            if !seen.insert(q.id.clone()) {
                return Err(CatalogError::DuplicateId(q.id.clone()));
            }
            let is_choice = matches!(q.kind, QuestionKind::Choice | QuestionKind::MultiChoice);
            if is_choice && q.options.is_empty() {
                return Err(CatalogError::MissingOptions(q.id.clone()));
            }
            if !is_choice && !q.options.is_empty() {
                return Err(CatalogError::UnexpectedOptions(q.id.clone()));
            }
        }
        for q in &questions {
            if let Some(vis) = &q.visibility {
                if !seen.contains(&vis.depends_on) {
                    return Err(CatalogError::UnknownDependency {
                        question: q.id.clone(),
                        depends_on: vis.depends_on.clone(),
                    });
                }
            }
        }

        let by_id = questions
            .iter()
            .enumerate()
            .map(|(i, q)| (q.id.clone(), i))
            .collect();

        Ok(Self { questions, by_id })
    }

    /// Questions in declared traversal order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Looks a question up by id.
    pub fn get(&self, id: &str) -> Option<&Question> {
        self.by_id.get(id).map(|&i| &self.questions[i])
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// The production intake catalog: 18 questions covering the facts the
/// analysis needs, with category-specific follow-ups.
pub fn standard_catalog() -> Arc<Catalog> {
    static CATALOG: Lazy<Arc<Catalog>> = Lazy::new(|| {
        Arc::new(Catalog::new(standard_questions()).expect("standard catalog is well-formed"))
    });
    CATALOG.clone()
}

fn standard_questions() -> Vec<Question> {
    use QuestionKind::*;

    vec![
        Question::new(
            "situation",
            "Décrivez votre situation en quelques phrases.",
            FreeText,
        )
        .with_validation(ValidationRule::required().with_min(20.0).with_max(2000.0)),
        Question::new("category", "De quel domaine relève votre problème ?", Choice)
            .with_options([
                "Droit du travail",
                "Droit de la famille",
                "Droit immobilier",
                "Droit de la consommation",
                "Droit des affaires",
                "Droit pénal",
                "Autre",
            ])
            .with_validation(ValidationRule::required()),
        Question::new(
            "urgency",
            "Sur une échelle de 1 à 10, quelle est l'urgence de votre situation ?",
            Number,
        )
        .with_validation(ValidationRule::required().with_min(1.0).with_max(10.0)),
        Question::new("location", "Dans quelle ville se situe le litige ?", FreeText)
            .with_validation(ValidationRule::required().with_max(120.0)),
        Question::new(
            "opposing_party",
            "Qui est la partie adverse (employeur, bailleur, commerçant…) ?",
            FreeText,
        ),
        Question::new("incident_date", "À quelle date le problème est-il survenu ?", Date),
        Question::new(
            "documents",
            "Quels documents avez-vous en votre possession ?",
            MultiChoice,
        )
        .with_options([
            "Contrat",
            "Courriers",
            "Factures",
            "Photos",
            "Témoignages",
            "Aucun",
        ]),
        Question::new(
            "prior_action",
            "Avez-vous déjà engagé une démarche (mise en demeure, plainte…) ?",
            Choice,
        )
        .with_options(["Oui", "Non"]),
        Question::new(
            "prior_action_detail",
            "Précisez la démarche déjà engagée.",
            FreeText,
        )
        .with_visibility(Visibility::when("prior_action", "Oui")),
        Question::new("contract_type", "Quel est votre type de contrat ?", Choice)
            .with_options(["CDI", "CDD", "Intérim", "Indépendant", "Autre"])
            .with_visibility(Visibility::when("category", "Droit du travail")),
        Question::new(
            "employer_size",
            "Quelle est la taille de l'entreprise ?",
            Choice,
        )
        .with_options(["Moins de 11 salariés", "11 à 49 salariés", "50 salariés et plus", "Je ne sais pas"])
        .with_visibility(Visibility::when("category", "Droit du travail")),
        Question::new(
            "family_status",
            "Quelle est votre situation familiale ?",
            Choice,
        )
        .with_options(["Marié(e)", "Pacsé(e)", "Concubinage", "Divorcé(e)", "Célibataire"])
        .with_visibility(Visibility::when("category", "Droit de la famille")),
        Question::new("children", "Avez-vous des enfants mineurs ?", Choice)
            .with_options(["Oui", "Non"])
            .with_visibility(Visibility::when("category", "Droit de la famille")),
        Question::new("property_role", "Quel est votre statut dans ce litige ?", Choice)
            .with_options(["Locataire", "Propriétaire", "Bailleur", "Copropriétaire"])
            .with_visibility(Visibility::when("category", "Droit immobilier")),
        Question::new(
            "amount_at_stake",
            "Quel montant est en jeu, en euros (0 si aucun) ?",
            Number,
        )
        .with_validation(ValidationRule::default().with_min(0.0)),
        Question::new("budget", "Quel budget pouvez-vous consacrer à ce dossier ?", Choice)
            .with_options([
                "Moins de 500 €",
                "500 à 2 000 €",
                "Plus de 2 000 €",
                "Aide juridictionnelle",
            ]),
        Question::new(
            "preferred_contact",
            "Comment préférez-vous être contacté(e) ?",
            Choice,
        )
        .with_options(["Email", "Téléphone", "Visio"]),
        Question::new(
            "consent",
            "Acceptez-vous que vos informations soient transmises à un professionnel du droit ?",
            Choice,
        )
        .with_options(["Oui", "Non"])
        .with_validation(ValidationRule::required()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_has_eighteen_questions() {
        assert_eq!(standard_catalog().len(), 18);
    }

    #[test]
    fn standard_catalog_ids_are_unique() {
        let catalog = standard_catalog();
        let mut ids = HashSet::new();
        for q in catalog.questions() {
            assert!(ids.insert(&q.id), "duplicate id {}", q.id);
        }
    }

    #[test]
    fn lookup_by_id_works() {
        let catalog = standard_catalog();
        assert!(catalog.get("situation").is_some());
        assert!(catalog.get("nonexistent").is_none());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let questions = vec![
            Question::new("a", "A?", QuestionKind::FreeText),
            Question::new("a", "A again?", QuestionKind::FreeText),
        ];
        assert_eq!(
            Catalog::new(questions).unwrap_err(),
            CatalogError::DuplicateId("a".into())
        );
    }

    #[test]
    fn rejects_dangling_visibility_reference() {
        let questions = vec![Question::new("b", "B?", QuestionKind::FreeText)
            .with_visibility(Visibility::when("missing", "x"))];
        assert!(matches!(
            Catalog::new(questions),
            Err(CatalogError::UnknownDependency { .. })
        ));
    }

    #[test]
    fn rejects_choice_without_options() {
        let questions = vec![Question::new("c", "C?", QuestionKind::Choice)];
        assert_eq!(
            Catalog::new(questions).unwrap_err(),
            CatalogError::MissingOptions("c".into())
        );
    }

    #[test]
    fn rejects_options_on_free_text() {
        let questions =
            vec![Question::new("d", "D?", QuestionKind::FreeText).with_options(["x"])];
        assert_eq!(
            Catalog::new(questions).unwrap_err(),
            CatalogError::UnexpectedOptions("d".into())
        );
    }
}
