// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test case registry: the built-in fixture suite and fixture file loading.

use crate::config::{FixtureFile, ERROR_LABEL};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading or validating fixtures.
///
/// All of these are fatal at startup: fixtures are trusted configuration.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Fixture {id}: field '{field}' must not be empty")]
    EmptyField { id: u32, field: &'static str },

    #[error("Fixture {id}: expected label '{label}' is reserved for provider errors")]
    ReservedLabel { id: u32, label: &'static str },

    #[error("Duplicate fixture id {0}")]
    DuplicateId(u32),

    #[error("Fixture ids must be contiguous from 1: expected {expected} at position {position}, found {found}")]
    NonContiguousId {
        position: usize,
        expected: u32,
        found: u32,
    },
}

/// A labeled fixture
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestCase {
    pub id: u32,
    pub input: String,
    pub expected: String,
    /// Descriptive tag; never used for pass/fail
    pub condition: String,
}

impl TestCase {
    pub fn new(
        id: u32,
        input: impl Into<String>,
        expected: impl Into<String>,
        condition: impl Into<String>,
    ) -> Self {
        Self {
            id,
            input: input.into(),
            expected: expected.into(),
            condition: condition.into(),
        }
    }
}

/// The built-in suite: clear, noisy, invalid, cross-lingual, accented and
/// low-quality input.
pub fn builtin_fixtures() -> Vec<TestCase> {
    vec![
        TestCase::new(1, "play music", "play music", "clear English input"),
        TestCase::new(2, "navigate to office", "navigate to", "valid English command"),
        TestCase::new(3, "play music in noise", "play music", "noisy English input"),
        TestCase::new(4, "invalid command", "unknown", "invalid English input"),
        TestCase::new(5, "call contact now", "call contact", "extended English input"),
        TestCase::new(6, "spiele musik", "play music", "clear German input"),
        TestCase::new(7, "navegar a casa", "navigate to", "clear Spanish input"),
        TestCase::new(8, "play music with accent", "play music", "accented English input"),
        TestCase::new(9, "low quality stop", "stop", "low-quality audio input"),
    ]
}

/// Load and validate fixtures from a TOML or JSON file
pub fn load_fixtures(path: &Path) -> Result<Vec<TestCase>, FixtureError> {
    let content = std::fs::read_to_string(path)?;
    let file: FixtureFile = if path.extension().is_some_and(|e| e == "json") {
        serde_json::from_str(&content)?
    } else {
        toml::from_str(&content)?
    };

    validate_fixtures(&file.fixtures)?;
    Ok(file.fixtures)
}

/// Check ids are unique and contiguous from 1, that input and expected are
/// non-empty, and that no fixture expects the error label. An empty list is
/// valid.
pub fn validate_fixtures(cases: &[TestCase]) -> Result<(), FixtureError> {
    let mut seen = HashSet::new();
    for case in cases {
        if !seen.insert(case.id) {
            return Err(FixtureError::DuplicateId(case.id));
        }
        if case.input.trim().is_empty() {
            return Err(FixtureError::EmptyField {
                id: case.id,
                field: "input",
            });
        }
        if case.expected.trim().is_empty() {
            return Err(FixtureError::EmptyField {
                id: case.id,
                field: "expected",
            });
        }
        if case.expected == ERROR_LABEL {
            return Err(FixtureError::ReservedLabel {
                id: case.id,
                label: ERROR_LABEL,
            });
        }
    }

    for (position, case) in cases.iter().enumerate() {
        let expected = position as u32 + 1;
        if case.id != expected {
            return Err(FixtureError::NonContiguousId {
                position,
                expected,
                found: case.id,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "fixtures_tests.rs"]
mod tests;
