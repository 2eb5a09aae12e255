//! Flow controller - decides what to ask next.

use std::sync::Arc;

use crate::domain::foundation::IntakeError;

use super::catalog::Catalog;
use super::question::Question;
use super::session::{AnswerValue, IntakeSession};

/// Computes the next unanswered, visible question for a session and
/// records validated answers.
#[derive(Clone)]
pub struct FlowController {
    catalog: Arc<Catalog>,
}

impl FlowController {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// First question in catalog order that is unanswered and visible.
    ///
    /// A question whose dependency is itself unanswered is treated as
    /// not-yet-visible and skipped without blocking the scan.
    pub fn next_question(&self, session: &IntakeSession) -> Option<&Question> {
        self.catalog.questions().iter().find(|q| {
            if session.has_answer(&q.id) {
                return false;
            }
            match &q.visibility {
                None => true,
                Some(vis) => vis.is_satisfied_by(session.answer(&vis.depends_on)),
            }
        })
    }

    /// Whether every visible question has an answer.
    pub fn is_complete(&self, session: &IntakeSession) -> bool {
        self.next_question(session).is_none()
    }

    /// Validates and records a direct answer. Overwriting is allowed.
    pub fn record_answer(
        &self,
        session: &mut IntakeSession,
        question_id: &str,
        value: AnswerValue,
    ) -> Result<(), IntakeError> {
        let question = self
            .catalog
            .get(question_id)
            .ok_or_else(|| IntakeError::UnknownQuestion(question_id.to_string()))?;
        question.check_answer(&value)?;
        session.set_answer(question_id, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SessionId;
    use crate::domain::intake::catalog::standard_catalog;
    use crate::domain::intake::question::{QuestionKind, Visibility};

    fn controller() -> FlowController {
        FlowController::new(standard_catalog())
    }

    fn session() -> IntakeSession {
        IntakeSession::new(SessionId::new("flow-test").unwrap())
    }

    #[test]
    fn first_question_is_the_situation() {
        let flow = controller();
        let s = session();
        assert_eq!(flow.next_question(&s).unwrap().id, "situation");
    }

    #[test]
    fn unknown_question_is_rejected() {
        let flow = controller();
        let mut s = session();
        let err = flow
            .record_answer(&mut s, "no_such_question", AnswerValue::Text("x".into()))
            .unwrap_err();
        assert!(matches!(err, IntakeError::UnknownQuestion(_)));
    }

    #[test]
    fn invalid_answer_is_rejected_and_not_recorded() {
        let flow = controller();
        let mut s = session();
        let err = flow
            .record_answer(&mut s, "urgency", AnswerValue::Number(42.0))
            .unwrap_err();
        assert!(matches!(err, IntakeError::Validation { .. }));
        assert!(!s.has_answer("urgency"));
    }

    #[test]
    fn direct_answers_may_overwrite() {
        let flow = controller();
        let mut s = session();
        flow.record_answer(&mut s, "urgency", AnswerValue::Number(3.0))
            .unwrap();
        flow.record_answer(&mut s, "urgency", AnswerValue::Number(9.0))
            .unwrap();
        assert_eq!(s.answer("urgency"), Some(&AnswerValue::Number(9.0)));
    }

    #[test]
    fn dependent_question_is_skipped_while_dependency_unanswered() {
        let flow = controller();
        let mut s = session();
        // Answer everything before prior_action_detail except its dependency.
        flow.record_answer(
            &mut s,
            "situation",
            AnswerValue::Text("Mon employeur ne me paie pas mes heures".into()),
        )
        .unwrap();
        flow.record_answer(
            &mut s,
            "category",
            AnswerValue::Choice("Droit de la consommation".into()),
        )
        .unwrap();
        flow.record_answer(&mut s, "urgency", AnswerValue::Number(5.0))
            .unwrap();
        flow.record_answer(&mut s, "location", AnswerValue::Text("Paris".into()))
            .unwrap();
        flow.record_answer(&mut s, "opposing_party", AnswerValue::Text("Vendeur".into()))
            .unwrap();
        flow.record_answer(
            &mut s,
            "incident_date",
            AnswerValue::Date(chrono::NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()),
        )
        .unwrap();
        flow.record_answer(
            &mut s,
            "documents",
            AnswerValue::MultiChoice(vec!["Factures".into()]),
        )
        .unwrap();

        // prior_action is unanswered, so prior_action_detail must be skipped
        // and the scan lands on prior_action itself.
        assert_eq!(flow.next_question(&s).unwrap().id, "prior_action");
    }

    #[test]
    fn visibility_gates_follow_up_questions() {
        let flow = controller();
        let mut s = session();
        flow.record_answer(&mut s, "prior_action", AnswerValue::Choice("Non".into()))
            .unwrap();
        // "Non" never reveals the detail question.
        let remaining: Vec<_> = std::iter::from_fn(|| {
            let q = flow.next_question(&s)?.id.clone();
            s.set_answer(q.clone(), default_answer_for(&flow, &q));
            Some(q)
        })
        .collect();
        assert!(!remaining.contains(&"prior_action_detail".to_string()));
    }

    #[test]
    fn flow_terminates_in_exactly_visible_question_steps() {
        let flow = controller();
        let mut s = session();
        let mut steps = 0;
        while let Some(q) = flow.next_question(&s) {
            let id = q.id.clone();
            let value = default_answer_for(&flow, &id);
            flow.record_answer(&mut s, &id, value).unwrap();
            steps += 1;
            assert!(steps <= flow.catalog().len(), "flow did not terminate");
        }
        assert!(flow.is_complete(&s));
        assert_eq!(steps, s.answered_count());
        assert!(flow.next_question(&s).is_none());
    }

    /// Produces a valid answer for any standard-catalog question.
    fn default_answer_for(flow: &FlowController, id: &str) -> AnswerValue {
        let q = flow.catalog().get(id).unwrap();
        match q.kind {
            QuestionKind::FreeText => {
                AnswerValue::Text("Une réponse libre suffisamment détaillée.".into())
            }
            QuestionKind::Number => AnswerValue::Number(5.0),
            QuestionKind::Date => {
                AnswerValue::Date(chrono::NaiveDate::from_ymd_opt(2026, 2, 1).unwrap())
            }
            QuestionKind::Choice => AnswerValue::Choice(q.options[0].clone()),
            QuestionKind::MultiChoice => AnswerValue::MultiChoice(vec![q.options[0].clone()]),
        }
    }

    #[test]
    fn category_follow_ups_appear_once_category_is_set() {
        let flow = controller();
        let mut s = session();
        assert!(flow
            .next_question(&s)
            .map(|q| q.id != "contract_type")
            .unwrap_or(false));

        flow.record_answer(
            &mut s,
            "category",
            AnswerValue::Choice("Droit du travail".into()),
        )
        .unwrap();

        let vis = Visibility::when("category", "Droit du travail");
        assert!(vis.is_satisfied_by(s.answer("category")));
    }
}
