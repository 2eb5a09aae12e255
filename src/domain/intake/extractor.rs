//! Freeform extractor - best-effort enrichment from one user message.
//!
//! Two passes, both first-write-wins and silent on failure:
//! 1. a deterministic keyword map capturing the raw message into
//!    still-unanswered questions, and
//! 2. a time-boxed model-assisted pass asking a provider for a small
//!    fixed-shape object.
//!
//! Neither pass may overwrite an existing answer or surface an error to
//! the caller; at worst the session is left unchanged.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::foundation::DeadlineBudget;
use crate::ports::{ExtractedFields, FieldExtractor};

use super::catalog::Catalog;
use super::question::QuestionKind;
use super::session::{AnswerValue, IntakeSession};

/// Keyword → question id map for the deterministic pass.
///
/// Keywords are matched by containment in the lower-cased message; the
/// raw message is stored as a coarse capture for later refinement.
const KEYWORD_MAP: &[(&str, &str)] = &[
    // employment signals
    ("licenci", "category"),
    ("salaire", "category"),
    ("employeur", "category"),
    ("heures sup", "category"),
    ("contrat de travail", "category"),
    // family signals
    ("divorce", "category"),
    ("garde des enfants", "category"),
    ("pension alimentaire", "category"),
    // housing signals
    ("loyer", "category"),
    ("bailleur", "category"),
    ("expulsion", "category"),
    ("caution", "category"),
    // consumer signals
    ("remboursement", "category"),
    ("garantie", "category"),
    ("arnaque", "category"),
    // urgency and location signals
    ("urgent", "urgency"),
    ("j'habite", "location"),
    ("domicilié", "location"),
];

/// Best-effort session enrichment from free text.
pub struct FreeformExtractor {
    catalog: Arc<Catalog>,
    fields: Option<Arc<dyn FieldExtractor>>,
    pass_budget: Duration,
}

impl FreeformExtractor {
    /// Creates an extractor with only the deterministic pass.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            fields: None,
            pass_budget: Duration::from_millis(1500),
        }
    }

    /// Enables the model-assisted pass.
    pub fn with_field_extractor(mut self, fields: Arc<dyn FieldExtractor>) -> Self {
        self.fields = Some(fields);
        self
    }

    /// Sets the model pass budget.
    pub fn with_pass_budget(mut self, budget: Duration) -> Self {
        self.pass_budget = budget;
        self
    }

    /// Enriches the session from one message. Never fails.
    pub async fn enrich(
        &self,
        session: &mut IntakeSession,
        message: &str,
        budget: &DeadlineBudget,
    ) {
        self.apply_keywords(session, message);
        self.apply_model_pass(session, message, budget).await;
    }

    /// Deterministic pass: coarse raw-message capture per keyword hit.
    fn apply_keywords(&self, session: &mut IntakeSession, message: &str) {
        let lowered = message.to_lowercase();
        for (keyword, question_id) in KEYWORD_MAP {
            if !lowered.contains(keyword) {
                continue;
            }
            if self.catalog.get(question_id).is_none() {
                continue;
            }
            if session.fill_if_absent(question_id, AnswerValue::Text(message.to_string())) {
                tracing::debug!(question = question_id, keyword, "keyword capture");
            }
        }
    }

    /// Model-assisted pass: skipped silently on missing provider, missing
    /// margin, timeout, or unparseable output.
    async fn apply_model_pass(
        &self,
        session: &mut IntakeSession,
        message: &str,
        budget: &DeadlineBudget,
    ) {
        let Some(provider) = &self.fields else {
            return;
        };
        if !budget.has_margin(self.pass_budget) {
            tracing::debug!("skipping model extraction pass: no time margin");
            return;
        }

        let timeout = budget.clamp(self.pass_budget);
        let extracted = match tokio::time::timeout(
            timeout,
            provider.extract_fields(message, timeout),
        )
        .await
        {
            Ok(Ok(fields)) => fields,
            Ok(Err(err)) => {
                tracing::debug!(error = %err, "model extraction pass failed");
                return;
            }
            Err(_) => {
                tracing::debug!("model extraction pass timed out");
                return;
            }
        };

        self.apply_fields(session, &extracted);
    }

    /// Coerces extracted scalars to the target question kinds and fills
    /// unanswered questions only.
    fn apply_fields(&self, session: &mut IntakeSession, fields: &ExtractedFields) {
        if let Some(category) = &fields.category {
            if let Some(value) = self.coerce("category", category) {
                session.fill_if_absent("category", value);
            }
        }
        if let Some(urgency) = fields.urgency {
            let clamped = urgency.clamp(1.0, 10.0);
            session.fill_if_absent("urgency", AnswerValue::Number(clamped));
        }
        if let Some(location) = &fields.location {
            if !location.trim().is_empty() {
                session.fill_if_absent("location", AnswerValue::Text(location.clone()));
            }
        }
        if let Some(party) = &fields.opposing_party {
            if !party.trim().is_empty() {
                session.fill_if_absent("opposing_party", AnswerValue::Text(party.clone()));
            }
        }
        if let Some(amount) = fields.amount_at_stake {
            if amount >= 0.0 {
                session.fill_if_absent("amount_at_stake", AnswerValue::Number(amount));
            }
        }
    }

    /// Matches a free-text value against a choice question's options.
    fn coerce(&self, question_id: &str, raw: &str) -> Option<AnswerValue> {
        let question = self.catalog.get(question_id)?;
        match question.kind {
            QuestionKind::Choice => {
                let canonical = question
                    .options
                    .iter()
                    .find(|o| o.eq_ignore_ascii_case(raw.trim()));
                match canonical {
                    Some(option) => Some(AnswerValue::Choice(option.clone())),
                    None => Some(AnswerValue::Text(raw.to_string())),
                }
            }
            _ => Some(AnswerValue::Text(raw.to_string())),
        }
    }
}
