// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use crate::backend::ScriptedBackend;
use crate::time::ClockHandle;
use proptest::prelude::*;
use voxcheck_capture::LogLevel;

fn commands() -> Vec<String> {
    default_commands()
}

#[test]
fn test_match_command_canonical_order() {
    let cmds = commands();
    assert_eq!(match_command(&cmds, "play music"), Some("play music"));
    assert_eq!(match_command(&cmds, "Navigate To office"), Some("navigate to"));
    // Both present: canonical order wins, not position in the input
    assert_eq!(match_command(&cmds, "stop and play music"), Some("play music"));
    assert_eq!(match_command(&cmds, "spiele musik"), None);
}

#[test]
fn test_prediction_clamps_confidence() {
    assert_eq!(Prediction::new("x", 1.7).confidence, 1.0);
    assert_eq!(Prediction::new("x", -0.2).confidence, 0.0);
    assert_eq!(Prediction::new("x", f64::NAN).confidence, 0.0);
    assert_eq!(Prediction::unknown(), Prediction::new("unknown", 0.1));
}

#[test]
fn test_mock_forced_match() {
    let mut mock = MockProvider::seeded(1.0, 42).unwrap();
    let prediction = mock.predict("play music").unwrap();
    assert_eq!(prediction.label, "play music");
    assert_eq!(prediction.confidence, 0.9);
}

#[test]
fn test_mock_no_keyword_is_unknown() {
    let mut mock = MockProvider::seeded(1.0, 42).unwrap();
    let prediction = mock.predict("invalid command").unwrap();
    assert_eq!(prediction.label, "unknown");
    assert_eq!(prediction.confidence, 0.1);
}

#[test]
fn test_mock_zero_accuracy_never_matches() {
    let mut mock = MockProvider::seeded(0.0, 7).unwrap();
    for _ in 0..100 {
        assert_eq!(mock.predict("play music").unwrap(), Prediction::unknown());
    }
}

#[test]
fn test_mock_same_seed_is_reproducible() {
    let mut a = MockProvider::seeded(0.5, 1234).unwrap();
    let mut b = MockProvider::seeded(0.5, 1234).unwrap();
    for _ in 0..50 {
        assert_eq!(a.predict("stop").unwrap(), b.predict("stop").unwrap());
    }
}

#[test]
fn test_mock_rejects_bad_accuracy() {
    for accuracy in [-0.1, 1.01, f64::NAN, f64::INFINITY] {
        assert!(MockProvider::seeded(accuracy, 0).is_err(), "{accuracy}");
    }
}

#[test]
fn test_mock_custom_commands() {
    let mut mock = MockProvider::seeded(1.0, 0)
        .unwrap()
        .with_commands(vec!["lights on".to_string()])
        .unwrap();
    assert_eq!(mock.predict("turn the lights on").unwrap().label, "lights on");
    assert_eq!(mock.predict("play music").unwrap().label, "unknown");

    assert_eq!(
        MockProvider::seeded(1.0, 0).unwrap().with_commands(vec![]).unwrap_err(),
        ProviderConfigError::EmptyCommandSet
    );
}

#[test]
fn test_mock_match_rate_converges_to_accuracy() {
    let trials = 20_000;
    for accuracy in [0.25, 0.5, 0.95] {
        let mut mock = MockProvider::seeded(accuracy, 99).unwrap();
        let matches = (0..trials)
            .filter(|_| mock.predict("play music").unwrap().label == "play music")
            .count();
        let rate = matches as f64 / trials as f64;
        assert!(
            (rate - accuracy).abs() < 0.02,
            "accuracy {accuracy}: observed {rate}"
        );
    }
}

#[test]
fn test_model_provider_maps_transcription() {
    let backend = ScriptedBackend::echo().with_response("spiele musik", "Play Music please");
    let mut model = ModelProvider::new(Box::new(backend));

    assert_eq!(model.predict("spiele musik").unwrap(), Prediction::matched("play music"));
    assert_eq!(model.predict("low quality stop").unwrap().label, "stop");
    assert_eq!(model.predict("gibberish").unwrap(), Prediction::unknown());
    assert_eq!(model.identity(), "Model (scripted)");
}

#[test]
fn test_model_provider_malformed_input() {
    let mut model = ModelProvider::new(Box::new(ScriptedBackend::echo()));
    assert!(matches!(
        model.predict("   "),
        Err(InferenceError::MalformedInput(_))
    ));
}

#[test]
fn test_model_provider_backend_error() {
    let backend = ScriptedBackend::echo()
        .with_failure("stop", InferenceError::Unavailable("offline".to_string()));
    let mut model = ModelProvider::new(Box::new(backend));
    assert_eq!(
        model.predict("stop"),
        Err(InferenceError::Unavailable("offline".to_string()))
    );
}

#[test]
fn test_select_available_backend() {
    let log = EventLog::new();
    let selection = Provider::select(
        BackendAvailability::Available(Box::new(ScriptedBackend::echo())),
        MockProvider::seeded(1.0, 0).unwrap(),
        &log,
        &ClockHandle::fake_at(0),
    );

    assert!(!selection.is_degraded());
    assert!(!selection.provider.is_mock());
    assert_eq!(selection.provider.identity(), "Model (scripted)");
    assert!(log.is_empty());
}

#[test]
fn test_select_falls_back_to_mock() {
    let log = EventLog::new();
    let selection = Provider::select(
        BackendAvailability::Unavailable(DependencyUnavailable::new("transcriber missing")),
        MockProvider::seeded(1.0, 0).unwrap(),
        &log,
        &ClockHandle::fake_at(1_768_473_000_000),
    );

    assert!(selection.is_degraded());
    assert!(selection.provider.is_mock());
    assert_eq!(selection.provider.identity(), "Mock");

    let warnings = log.find_by_level(LogLevel::Warn);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.contains("transcriber missing"));
    assert_eq!(warnings[0].timestamp.to_rfc3339(), "2026-01-15T10:30:00+00:00");
}

#[test]
fn test_provider_dispatch() {
    let mut provider = Provider::Mock(MockProvider::seeded(1.0, 3).unwrap());
    assert_eq!(provider.predict("call contact now").unwrap().label, "call contact");
}

proptest! {
    #[test]
    fn mock_confidence_in_unit_interval(input in ".{0,40}", seed in any::<u64>(), accuracy in 0.0f64..=1.0) {
        let mut mock = MockProvider::seeded(accuracy, seed).unwrap();
        let prediction = mock.predict(&input).unwrap();
        prop_assert!((0.0..=1.0).contains(&prediction.confidence));
        prop_assert!(prediction.label == "unknown" || default_commands().contains(&prediction.label));
    }
}
