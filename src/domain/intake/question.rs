//! Question definitions for the intake catalog.

use regex::Regex;
use serde::Serialize;

use crate::domain::foundation::IntakeError;

use super::session::AnswerValue;

/// The kind of input a question expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// One option out of a fixed list.
    Choice,
    /// Any subset of a fixed list.
    MultiChoice,
    /// Unconstrained text.
    FreeText,
    /// A numeric value.
    Number,
    /// A calendar date.
    Date,
}

impl QuestionKind {
    /// Human-readable name used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::Choice => "choice",
            QuestionKind::MultiChoice => "multi_choice",
            QuestionKind::FreeText => "free_text",
            QuestionKind::Number => "number",
            QuestionKind::Date => "date",
        }
    }
}

/// Condition gating whether a question is asked at all.
///
/// The question becomes visible once the question it depends on has an
/// answer matching one of `required_any`. An empty `required_any` means
/// any answer makes it visible.
#[derive(Debug, Clone, Serialize)]
pub struct Visibility {
    /// Id of the question this one depends on.
    pub depends_on: String,
    /// Accepted answers, rendered as text.
    pub required_any: Vec<String>,
}

impl Visibility {
    /// Creates a visibility condition on one accepted answer.
    pub fn when(depends_on: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            depends_on: depends_on.into(),
            required_any: vec![value.into()],
        }
    }

    /// Creates a visibility condition on a set of accepted answers.
    pub fn when_any(
        depends_on: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            depends_on: depends_on.into(),
            required_any: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Evaluates the condition against a recorded answer, if any.
    ///
    /// An unanswered dependency means "not yet visible", never an error.
    pub fn is_satisfied_by(&self, answer: Option<&AnswerValue>) -> bool {
        let Some(answer) = answer else {
            return false;
        };
        if self.required_any.is_empty() {
            return true;
        }
        answer
            .rendered_values()
            .iter()
            .any(|v| self.required_any.iter().any(|r| r.eq_ignore_ascii_case(v)))
    }
}

/// Validation rule applied when an answer is recorded.
///
/// `min`/`max` bound the numeric value for number questions and the
/// character count for text questions.
#[derive(Debug, Clone, Default)]
pub struct ValidationRule {
    pub required: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub pattern: Option<Regex>,
}

impl ValidationRule {
    /// A rule that only demands a non-empty answer.
    pub fn required() -> Self {
        Self {
            required: true,
            ..Self::default()
        }
    }

    /// Sets the lower bound (numeric value or text length).
    pub fn with_min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Sets the upper bound (numeric value or text length).
    pub fn with_max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Sets a regex the rendered answer must match.
    pub fn with_pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }
}

/// Immutable catalog entry.
#[derive(Debug, Clone)]
pub struct Question {
    pub id: String,
    pub text: String,
    pub kind: QuestionKind,
    /// Present iff `kind` is Choice or MultiChoice.
    pub options: Vec<String>,
    pub visibility: Option<Visibility>,
    pub validation: Option<ValidationRule>,
}

impl Question {
    /// Creates a question with no options, visibility, or validation.
    pub fn new(id: impl Into<String>, text: impl Into<String>, kind: QuestionKind) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            kind,
            options: Vec::new(),
            visibility: None,
            validation: None,
        }
    }

    /// Sets the option list for choice questions.
    pub fn with_options(mut self, options: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the visibility condition.
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = Some(visibility);
        self
    }

    /// Sets the validation rule.
    pub fn with_validation(mut self, validation: ValidationRule) -> Self {
        self.validation = Some(validation);
        self
    }

    /// Checks a directly-recorded answer: shape first, then the rule.
    pub fn check_answer(&self, value: &AnswerValue) -> Result<(), IntakeError> {
        self.check_shape(value)?;
        if let Some(rule) = &self.validation {
            self.check_rule(rule, value)?;
        }
        Ok(())
    }

    fn check_shape(&self, value: &AnswerValue) -> Result<(), IntakeError> {
        let mismatch = || IntakeError::TypeMismatch {
            question: self.id.clone(),
            expected: self.kind.as_str(),
        };

        match (self.kind, value) {
            (QuestionKind::FreeText, AnswerValue::Text(_)) => Ok(()),
            (QuestionKind::Number, AnswerValue::Number(_)) => Ok(()),
            (QuestionKind::Date, AnswerValue::Date(_)) => Ok(()),
            (QuestionKind::Choice, AnswerValue::Choice(picked)) => {
                if self.options.iter().any(|o| o == picked) {
                    Ok(())
                } else {
                    Err(IntakeError::validation(
                        &self.id,
                        format!("'{}' is not one of the offered options", picked),
                    ))
                }
            }
            (QuestionKind::MultiChoice, AnswerValue::MultiChoice(picked)) => {
                match picked.iter().find(|p| !self.options.contains(*p)) {
                    None => Ok(()),
                    Some(bad) => Err(IntakeError::validation(
                        &self.id,
                        format!("'{}' is not one of the offered options", bad),
                    )),
                }
            }
            _ => Err(mismatch()),
        }
    }

    fn check_rule(&self, rule: &ValidationRule, value: &AnswerValue) -> Result<(), IntakeError> {
        if rule.required && value.is_empty() {
            return Err(IntakeError::validation(&self.id, "an answer is required"));
        }

        // min/max bound the value for numbers, the length for text
        let measured = match value {
            AnswerValue::Number(n) => Some(*n),
            AnswerValue::Text(s) => Some(s.chars().count() as f64),
            _ => None,
        };
        if let Some(measured) = measured {
            if let Some(min) = rule.min {
                if measured < min {
                    return Err(IntakeError::validation(
                        &self.id,
                        format!("below the minimum of {}", min),
                    ));
                }
            }
            if let Some(max) = rule.max {
                if measured > max {
                    return Err(IntakeError::validation(
                        &self.id,
                        format!("above the maximum of {}", max),
                    ));
                }
            }
        }

        if let Some(pattern) = &rule.pattern {
            let rendered = value.render();
            if !pattern.is_match(&rendered) {
                return Err(IntakeError::validation(
                    &self.id,
                    format!("does not match the expected format ({})", pattern.as_str()),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choice_question() -> Question {
        Question::new("color", "Pick a color", QuestionKind::Choice)
            .with_options(["Rouge", "Bleu"])
    }

    #[test]
    fn free_text_accepts_text() {
        let q = Question::new("notes", "Notes?", QuestionKind::FreeText);
        assert!(q.check_answer(&AnswerValue::Text("hello".into())).is_ok());
    }

    #[test]
    fn free_text_rejects_number() {
        let q = Question::new("notes", "Notes?", QuestionKind::FreeText);
        let err = q.check_answer(&AnswerValue::Number(3.0)).unwrap_err();
        assert!(matches!(err, IntakeError::TypeMismatch { .. }));
    }

    #[test]
    fn choice_rejects_unknown_option() {
        let q = choice_question();
        assert!(q.check_answer(&AnswerValue::Choice("Rouge".into())).is_ok());
        assert!(q.check_answer(&AnswerValue::Choice("Vert".into())).is_err());
    }

    #[test]
    fn multi_choice_rejects_any_unknown_option() {
        let q = Question::new("docs", "Documents?", QuestionKind::MultiChoice)
            .with_options(["Contrat", "Factures"]);
        assert!(q
            .check_answer(&AnswerValue::MultiChoice(vec!["Contrat".into()]))
            .is_ok());
        assert!(q
            .check_answer(&AnswerValue::MultiChoice(vec![
                "Contrat".into(),
                "Photos".into()
            ]))
            .is_err());
    }

    #[test]
    fn required_rejects_empty_text() {
        let q = Question::new("notes", "Notes?", QuestionKind::FreeText)
            .with_validation(ValidationRule::required());
        assert!(q.check_answer(&AnswerValue::Text("  ".into())).is_err());
    }

    #[test]
    fn min_max_bound_numeric_value() {
        let q = Question::new("urgency", "Urgency?", QuestionKind::Number)
            .with_validation(ValidationRule::required().with_min(1.0).with_max(10.0));
        assert!(q.check_answer(&AnswerValue::Number(5.0)).is_ok());
        assert!(q.check_answer(&AnswerValue::Number(0.0)).is_err());
        assert!(q.check_answer(&AnswerValue::Number(11.0)).is_err());
    }

    #[test]
    fn min_max_bound_text_length() {
        let q = Question::new("situation", "Describe", QuestionKind::FreeText)
            .with_validation(ValidationRule::required().with_min(5.0));
        assert!(q.check_answer(&AnswerValue::Text("abc".into())).is_err());
        assert!(q.check_answer(&AnswerValue::Text("long enough".into())).is_ok());
    }

    #[test]
    fn pattern_applies_to_rendered_answer() {
        let q = Question::new("postcode", "Code postal?", QuestionKind::FreeText)
            .with_validation(
                ValidationRule::required().with_pattern(Regex::new(r"^\d{5}$").unwrap()),
            );
        assert!(q.check_answer(&AnswerValue::Text("75011".into())).is_ok());
        assert!(q.check_answer(&AnswerValue::Text("paris".into())).is_err());
    }

    #[test]
    fn visibility_unsatisfied_when_dependency_unanswered() {
        let vis = Visibility::when("category", "Droit du travail");
        assert!(!vis.is_satisfied_by(None));
    }

    #[test]
    fn visibility_matches_case_insensitively() {
        let vis = Visibility::when("category", "Droit du travail");
        let answer = AnswerValue::Choice("droit du travail".into());
        assert!(vis.is_satisfied_by(Some(&answer)));
    }

    #[test]
    fn visibility_matches_any_of_multi_choice() {
        let vis = Visibility::when_any("docs", ["Contrat", "Factures"]);
        let answer = AnswerValue::MultiChoice(vec!["Photos".into(), "Factures".into()]);
        assert!(vis.is_satisfied_by(Some(&answer)));
    }

    #[test]
    fn empty_required_any_means_any_answer() {
        let vis = Visibility {
            depends_on: "q".into(),
            required_any: vec![],
        };
        assert!(vis.is_satisfied_by(Some(&AnswerValue::Text("anything".into()))));
        assert!(!vis.is_satisfied_by(None));
    }
}
