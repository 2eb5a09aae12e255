//! Property tests: the coalescer is total. Whatever shape the provider
//! returned, the resulting analysis satisfies every structural invariant.

use proptest::prelude::*;
use serde_json::{json, Value};

use lexflow::domain::analysis::{
    AnalysisDefaults, AuditPayload, ProviderOutcome, ResultCoalescer,
};
use lexflow::domain::foundation::SessionId;
use lexflow::domain::intake::{AnswerValue, IntakeSession};
use lexflow::ports::ProviderError;

/// Arbitrary JSON scalar-ish values of the kinds a model actually emits.
fn arb_json_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        any::<f64>().prop_filter("finite", |f| f.is_finite()).prop_map(|f| json!(f)),
        "[ -~éàè]{0,40}".prop_map(Value::String),
        proptest::collection::vec("[ -~]{0,20}".prop_map(Value::String), 0..5)
            .prop_map(|items| json!(items)),
    ]
}

fn arb_opt_string() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[ -~éàè]{0,60}")
}

prop_compose! {
    fn arb_payload()(
        summary in arb_opt_string(),
        category in arb_opt_string(),
        urgency in proptest::option::of(arb_json_value()),
        complexity in arb_opt_string(),
        actions in proptest::option::of(arb_json_value()),
        needs_lawyer in proptest::option::of(arb_json_value()),
        recommended_specialty in arb_opt_string(),
        recommended_template_id in arb_opt_string(),
        problem_statement in arb_opt_string(),
        risks in proptest::option::of(arb_json_value()),
        cost_min in proptest::option::of(arb_json_value()),
        cost_max in proptest::option::of(arb_json_value()),
        next_step in arb_opt_string(),
    ) -> AuditPayload {
        AuditPayload {
            summary,
            category,
            urgency,
            complexity,
            actions,
            needs_lawyer,
            recommended_specialty,
            recommended_template_id,
            problem_statement,
            risks,
            estimated_cost_min_eur: cost_min,
            estimated_cost_max_eur: cost_max,
            next_step,
        }
    }
}

fn arb_outcome() -> impl Strategy<Value = ProviderOutcome<AuditPayload>> {
    prop_oneof![
        arb_payload().prop_map(ProviderOutcome::Success),
        Just(ProviderOutcome::Failure(ProviderError::Timeout)),
        Just(ProviderOutcome::Failure(ProviderError::NotConfigured)),
        "[ -~]{0,30}".prop_map(|s| ProviderOutcome::Failure(ProviderError::Malformed(s))),
    ]
}

fn arb_session() -> impl Strategy<Value = IntakeSession> {
    (
        proptest::option::of("[ -~éàè]{0,80}"),
        proptest::option::of(-5.0f64..20.0),
        proptest::option::of("[ -~éàè]{0,40}"),
    )
        .prop_map(|(situation, urgency, category)| {
            let mut session = IntakeSession::new(SessionId::new("prop").unwrap());
            if let Some(situation) = situation {
                session.set_answer("situation", AnswerValue::Text(situation));
            }
            if let Some(urgency) = urgency {
                session.set_answer("urgency", AnswerValue::Number(urgency));
            }
            if let Some(category) = category {
                session.set_answer("category", AnswerValue::Choice(category));
            }
            session
        })
}

proptest! {
    #[test]
    fn coalesce_always_satisfies_the_invariants(
        outcome in arb_outcome(),
        session in arb_session(),
    ) {
        let coalescer = ResultCoalescer::new(AnalysisDefaults::default());
        let analysis = coalescer.coalesce(&outcome, &session);

        prop_assert!(analysis.is_well_formed(), "invariants violated: {:?}", analysis);
        prop_assert!((1..=10).contains(&analysis.urgency));
        prop_assert!(!analysis.actions.is_empty());
        prop_assert!(!analysis.summary.trim().is_empty());
        prop_assert!(!analysis.category.trim().is_empty());
        prop_assert!(!analysis.recommended_specialty.trim().is_empty());
    }
}
