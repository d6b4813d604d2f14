// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Classifier providers.
//!
//! The engine depends only on the [`Classifier`] trait. Production runs use
//! [`Provider`], a closed set of variants chosen once by [`Provider::select`]:
//! the model-backed provider when its inference backend is available, the
//! seeded mock otherwise.

use crate::config::{default_commands, MATCH_CONFIDENCE, NO_MATCH_CONFIDENCE, UNKNOWN_LABEL};
use crate::time::Clock;
use thiserror::Error;
use voxcheck_capture::{EventLog, LogLevel};

/// Errors from a single predict call
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InferenceError {
    #[error("Inference backend unavailable: {0}")]
    Unavailable(String),

    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Inference backend failed: {0}")]
    Backend(String),
}

/// The inference backend could not be set up at startup
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("Inference backend unavailable: {reason}")]
pub struct DependencyUnavailable {
    pub reason: String,
}

impl DependencyUnavailable {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Invalid provider construction parameters
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ProviderConfigError {
    #[error("Invalid accuracy {0}: must be within [0, 1]")]
    InvalidAccuracy(f64),

    #[error("Command set must not be empty")]
    EmptyCommandSet,
}

/// A predicted label with its confidence
#[derive(Clone, Debug, PartialEq)]
pub struct Prediction {
    pub label: String,
    /// Always within [0, 1]
    pub confidence: f64,
}

impl Prediction {
    /// Create a prediction, clamping confidence into [0, 1]
    pub fn new(label: impl Into<String>, confidence: f64) -> Self {
        let confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };
        Self {
            label: label.into(),
            confidence,
        }
    }

    /// The `("unknown", 0.1)` prediction
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_LABEL, NO_MATCH_CONFIDENCE)
    }

    /// A recognized command at match confidence
    pub fn matched(command: &str) -> Self {
        Self::new(command, MATCH_CONFIDENCE)
    }
}

/// Anything that can label an input
pub trait Classifier {
    /// Predict a label for one input
    fn predict(&mut self, input: &str) -> Result<Prediction, InferenceError>;

    /// Identity string shown in reports
    fn identity(&self) -> String;
}

impl<C: Classifier + ?Sized> Classifier for &mut C {
    fn predict(&mut self, input: &str) -> Result<Prediction, InferenceError> {
        (**self).predict(input)
    }

    fn identity(&self) -> String {
        (**self).identity()
    }
}

impl<C: Classifier + ?Sized> Classifier for Box<C> {
    fn predict(&mut self, input: &str) -> Result<Prediction, InferenceError> {
        (**self).predict(input)
    }

    fn identity(&self) -> String {
        (**self).identity()
    }
}

/// Return the first command (in canonical order) contained in the
/// lowercased text.
pub fn match_command<'a>(commands: &'a [String], text: &str) -> Option<&'a str> {
    let text = text.to_lowercase();
    commands
        .iter()
        .find(|cmd| text.contains(cmd.as_str()))
        .map(String::as_str)
}

/// Stochastic keyword matcher used when no model backend is available.
///
/// Each call draws one sample from the injected RNG. Below `accuracy` the
/// input is scanned for a command; otherwise the result is `unknown`.
#[derive(Debug)]
pub struct MockProvider {
    commands: Vec<String>,
    accuracy: f64,
    rng: fastrand::Rng,
}

impl MockProvider {
    /// Create a mock with the canonical command set and an injected RNG
    pub fn new(accuracy: f64, rng: fastrand::Rng) -> Result<Self, ProviderConfigError> {
        if !accuracy.is_finite() || !(0.0..=1.0).contains(&accuracy) {
            return Err(ProviderConfigError::InvalidAccuracy(accuracy));
        }
        Ok(Self {
            commands: default_commands(),
            accuracy,
            rng,
        })
    }

    /// Create a mock with a seeded RNG
    pub fn seeded(accuracy: f64, seed: u64) -> Result<Self, ProviderConfigError> {
        Self::new(accuracy, fastrand::Rng::with_seed(seed))
    }

    /// Replace the command set
    pub fn with_commands(mut self, commands: Vec<String>) -> Result<Self, ProviderConfigError> {
        if commands.is_empty() {
            return Err(ProviderConfigError::EmptyCommandSet);
        }
        self.commands = commands;
        Ok(self)
    }

    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    pub fn commands(&self) -> &[String] {
        &self.commands
    }
}

impl Classifier for MockProvider {
    fn predict(&mut self, input: &str) -> Result<Prediction, InferenceError> {
        // f64() is in [0, 1), so accuracy 1.0 always takes the match branch
        if self.rng.f64() < self.accuracy {
            if let Some(cmd) = match_command(&self.commands, input) {
                return Ok(Prediction::matched(cmd));
            }
        }
        Ok(Prediction::unknown())
    }

    fn identity(&self) -> String {
        "Mock".to_string()
    }
}

/// External inference backend producing a transcription for an input
pub trait InferenceBackend: Send {
    /// Short backend name for reports
    fn name(&self) -> &str;

    /// Transcribe one input
    fn transcribe(&mut self, input: &str) -> Result<String, InferenceError>;
}

/// Provider delegating to an inference backend and mapping the
/// transcription onto the command set.
pub struct ModelProvider {
    backend: Box<dyn InferenceBackend>,
    commands: Vec<String>,
}

impl ModelProvider {
    pub fn new(backend: Box<dyn InferenceBackend>) -> Self {
        Self {
            backend,
            commands: default_commands(),
        }
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }
}

impl std::fmt::Debug for ModelProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelProvider")
            .field("backend", &self.backend.name())
            .field("commands", &self.commands)
            .finish()
    }
}

impl Classifier for ModelProvider {
    fn predict(&mut self, input: &str) -> Result<Prediction, InferenceError> {
        if input.trim().is_empty() {
            return Err(InferenceError::MalformedInput(
                "input is empty".to_string(),
            ));
        }

        let transcription = self.backend.transcribe(input)?;
        Ok(match match_command(&self.commands, &transcription) {
            Some(cmd) => Prediction::matched(cmd),
            None => Prediction::unknown(),
        })
    }

    fn identity(&self) -> String {
        format!("Model ({})", self.backend.name())
    }
}

/// Result of probing the inference backend at startup
pub enum BackendAvailability {
    Available(Box<dyn InferenceBackend>),
    Unavailable(DependencyUnavailable),
}

impl std::fmt::Debug for BackendAvailability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Available(backend) => f.debug_tuple("Available").field(&backend.name()).finish(),
            Self::Unavailable(err) => f.debug_tuple("Unavailable").field(err).finish(),
        }
    }
}

/// Closed set of production providers
#[derive(Debug)]
pub enum Provider {
    Mock(MockProvider),
    Model(ModelProvider),
}

/// A provider chosen for a run, with the reason it is degraded (if any)
#[derive(Debug)]
pub struct ProviderSelection {
    pub provider: Provider,
    /// Set when the backend was unavailable and the mock was substituted
    pub degraded: Option<DependencyUnavailable>,
}

impl ProviderSelection {
    /// Whether the run is in demo mode
    pub fn is_degraded(&self) -> bool {
        self.degraded.is_some()
    }
}

impl Provider {
    /// Choose the provider for a run.
    ///
    /// An available backend yields the model provider. Otherwise the mock is
    /// used, a warning is logged, and the selection is marked degraded.
    pub fn select(
        availability: BackendAvailability,
        mock: MockProvider,
        log: &EventLog,
        clock: &dyn Clock,
    ) -> ProviderSelection {
        match availability {
            BackendAvailability::Available(backend) => ProviderSelection {
                provider: Provider::Model(ModelProvider::new(backend)),
                degraded: None,
            },
            BackendAvailability::Unavailable(reason) => {
                log.record_at(
                    clock.now_utc(),
                    LogLevel::Warn,
                    format!("{}. Using mock provider for demo.", reason),
                );
                ProviderSelection {
                    provider: Provider::Mock(mock),
                    degraded: Some(reason),
                }
            }
        }
    }

    pub fn is_mock(&self) -> bool {
        matches!(self, Provider::Mock(_))
    }
}

impl Classifier for Provider {
    fn predict(&mut self, input: &str) -> Result<Prediction, InferenceError> {
        match self {
            Provider::Mock(p) => p.predict(input),
            Provider::Model(p) => p.predict(input),
        }
    }

    fn identity(&self) -> String {
        match self {
            Provider::Mock(p) => p.identity(),
            Provider::Model(p) => p.identity(),
        }
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
