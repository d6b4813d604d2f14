// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use crate::backend::ScriptedBackend;
use crate::failure::{FailureMode, FailurePlan, FaultInjector};
use crate::fixtures::builtin_fixtures;
use crate::provider::{InferenceError, MockProvider, ModelProvider, Prediction};
use proptest::prelude::*;

/// Deterministic stub: echoes the input as the label with fixed confidence,
/// failing on one chosen input.
struct EchoStub {
    fail_input: Option<String>,
}

impl Classifier for EchoStub {
    fn predict(&mut self, input: &str) -> Result<Prediction, InferenceError> {
        if self.fail_input.as_deref() == Some(input) {
            return Err(InferenceError::Backend("stub failure".to_string()));
        }
        Ok(Prediction::new(input, 0.75))
    }

    fn identity(&self) -> String {
        "Echo".to_string()
    }
}

fn engine<C: Classifier>(classifier: C) -> (ValidationEngine<C>, EventLog) {
    let log = EventLog::new();
    let engine = ValidationEngine::new(classifier, log.clone(), ClockHandle::fake_at(0));
    (engine, log)
}

fn five_cases() -> Vec<TestCase> {
    vec![
        TestCase::new(1, "play music", "play music", "clear"),
        TestCase::new(2, "stop", "stop", "clear"),
        TestCase::new(3, "call contact", "call contact", "clear"),
        TestCase::new(4, "navigate to", "navigate to", "clear"),
        TestCase::new(5, "unknown", "unknown", "invalid"),
    ]
}

#[test]
fn test_forced_match_passes() {
    let (mut engine, _) = engine(MockProvider::seeded(1.0, 1).unwrap());
    let outcomes = engine.run(&[TestCase::new(1, "play music", "play music", "clear English input")]);

    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].passed);
    assert_eq!(outcomes[0].predicted, "play music");
    assert_eq!(outcomes[0].confidence, 0.9);
}

#[test]
fn test_invalid_command_predicts_unknown() {
    let (mut engine, _) = engine(MockProvider::seeded(1.0, 1).unwrap());
    let outcomes = engine.run(&[TestCase::new(4, "invalid command", "unknown", "invalid English input")]);

    assert_eq!(outcomes[0].predicted, "unknown");
    assert_eq!(outcomes[0].confidence, 0.1);
    assert!(outcomes[0].passed);
}

#[test]
fn test_one_provider_error_in_five() {
    let stub = EchoStub {
        fail_input: Some("call contact".to_string()),
    };
    let (mut engine, log) = engine(stub);
    let outcomes = engine.run(&five_cases()).to_vec();

    assert_eq!(outcomes.len(), 5);
    let failed: Vec<_> = outcomes.iter().filter(|o| !o.passed).collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].test_id, 3);
    assert_eq!(failed[0].predicted, "error");
    assert_eq!(failed[0].confidence, 0.0);

    for outcome in outcomes.iter().filter(|o| o.test_id != 3) {
        assert!(outcome.passed);
        assert_eq!(outcome.predicted, outcome.input);
        assert_eq!(outcome.confidence, 0.75);
    }

    assert_eq!(log.len(), 5);
    let warnings = log.find_by_level(LogLevel::Warn);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.starts_with("Test ID 3:"));
    assert!(warnings[0].message.contains("Error=Inference backend failed: stub failure"));
}

#[test]
fn test_injected_failure_is_isolated() {
    let mock = MockProvider::seeded(1.0, 5).unwrap();
    let injector = FaultInjector::new(mock, FailurePlan::new([2], FailureMode::MalformedInput));
    let (mut engine, _) = engine(injector);

    let outcomes = engine.run(&builtin_fixtures());
    assert_eq!(outcomes.len(), 9);
    assert_eq!(outcomes[1].predicted, "error");
    assert!(!outcomes[1].passed);
    assert_eq!(outcomes[2].predicted, "play music");
    assert!(outcomes[2].passed);
}

#[test]
fn test_outcome_fields_copied_from_fixture() {
    let (mut engine, _) = engine(EchoStub { fail_input: None });
    let cases = vec![TestCase::new(7, "navegar a casa", "navigate to", "clear Spanish input")];
    let outcome = &engine.run(&cases)[0];

    assert_eq!(
        outcome,
        &TestOutcome {
            test_id: 7,
            input: "navegar a casa".to_string(),
            expected: "navigate to".to_string(),
            predicted: "navegar a casa".to_string(),
            confidence: 0.75,
            condition: "clear Spanish input".to_string(),
            passed: false,
        }
    );
}

#[test]
fn test_condition_does_not_affect_pass() {
    let (mut engine, _) = engine(EchoStub { fail_input: None });
    let outcomes = engine.run(&[
        TestCase::new(1, "stop", "stop", "low-quality audio input"),
        TestCase::new(2, "stop", "stop", ""),
    ]);
    assert!(outcomes.iter().all(|o| o.passed));
}

#[test]
fn test_empty_fixture_list() {
    let (mut engine, log) = engine(EchoStub { fail_input: None });
    assert!(engine.run(&[]).is_empty());
    assert!(log.is_empty());
}

#[test]
fn test_rerun_starts_from_scratch() {
    let (mut engine, log) = engine(EchoStub { fail_input: None });
    engine.run(&five_cases());
    engine.run(&five_cases()[..2]);

    assert_eq!(engine.outcomes().len(), 2);
    assert_eq!(log.len(), 7);
}

#[test]
fn test_stub_runs_are_deterministic() {
    let run = || {
        let backend = ScriptedBackend::echo().with_response("spiele musik", "play music");
        let (mut engine, _) = engine(ModelProvider::new(Box::new(backend)));
        engine.run(&builtin_fixtures());
        engine.into_outcomes()
    };
    assert_eq!(run(), run());
}

#[test]
fn test_log_line_format() {
    let log = EventLog::new();
    let clock = ClockHandle::fake_at(1_768_473_000_000);
    let mut engine = ValidationEngine::new(EchoStub { fail_input: None }, log.clone(), clock);
    engine.run(&[TestCase::new(1, "stop", "stop", "clear English input")]);

    let records = log.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].level, LogLevel::Info);
    assert_eq!(records[0].timestamp.to_rfc3339(), "2026-01-15T10:30:00+00:00");
    assert_eq!(
        records[0].message,
        "Test ID 1: Condition=clear English input, Passed=true, Input=stop, Predicted=stop, Confidence=0.75"
    );
}

#[test]
fn test_normalize_input_is_identity() {
    assert_eq!(normalize_input("Play Music "), "Play Music ");
}

fn arb_cases() -> impl Strategy<Value = Vec<TestCase>> {
    prop::collection::vec(("[a-z ]{1,20}", "[a-z ]{1,20}"), 0..30).prop_map(|pairs| {
        pairs
            .into_iter()
            .enumerate()
            .map(|(i, (input, expected))| TestCase::new(i as u32 + 1, input, expected, "generated"))
            .collect()
    })
}

proptest! {
    #[test]
    fn one_outcome_per_fixture_in_order(cases in arb_cases(), fail_at in 0usize..40) {
        let plan = FailurePlan::new([fail_at], FailureMode::BackendError);
        let (mut engine, log) = engine(FaultInjector::new(EchoStub { fail_input: None }, plan));
        let outcomes = engine.run(&cases);

        prop_assert_eq!(outcomes.len(), cases.len());
        prop_assert_eq!(log.len(), cases.len());
        for (case, outcome) in cases.iter().zip(outcomes) {
            prop_assert_eq!(case.id, outcome.test_id);
            prop_assert_eq!(&case.input, &outcome.input);
            prop_assert_eq!(outcome.passed, outcome.predicted == outcome.expected);
        }
    }
}
