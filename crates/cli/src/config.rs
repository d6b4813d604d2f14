// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Harness configuration and fixture file types.

use crate::failure::FailurePlan;
use crate::fixtures::TestCase;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default tabular export path
pub const DEFAULT_REPORT_FILE: &str = "validation_report.csv";
/// Default chart image path
pub const DEFAULT_CHART_FILE: &str = "validation_results.png";
/// Default structured log path
pub const DEFAULT_LOG_FILE: &str = "validation_report.log";
/// Default mock provider accuracy
pub const DEFAULT_ACCURACY: f64 = 0.95;

/// Canonical command set, in match priority order
pub const COMMANDS: [&str; 4] = ["play music", "navigate to", "call contact", "stop"];

/// Label returned when no command is recognized
pub const UNKNOWN_LABEL: &str = "unknown";
/// Predicted label recorded when the provider fails
pub const ERROR_LABEL: &str = "error";
/// Confidence reported for a recognized command
pub const MATCH_CONFIDENCE: f64 = 0.9;
/// Confidence reported for `unknown`
pub const NO_MATCH_CONFIDENCE: f64 = 0.1;

/// Canonical command set as owned strings
pub fn default_commands() -> Vec<String> {
    COMMANDS.iter().map(|c| c.to_string()).collect()
}

/// Top-level fixture file (TOML or JSON)
///
/// ```toml
/// name = "smoke"
///
/// [[fixtures]]
/// id = 1
/// input = "play music"
/// expected = "play music"
/// condition = "clear English input"
/// ```
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FixtureFile {
    /// Name for logging/debugging
    #[serde(default)]
    pub name: String,

    /// Ordered fixture records
    #[serde(default)]
    pub fixtures: Vec<TestCase>,
}

/// Which provider the harness should try to build
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BackendChoice {
    /// Use the model backend when available, otherwise fall back to the mock
    #[default]
    Auto,
    /// Always use the mock provider
    Mock,
    /// Require the model backend; unavailability is fatal
    Model,
}

/// External transcriber command for the model backend
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendCommand {
    pub program: String,
    pub args: Vec<String>,
}

/// Resolved settings for one harness run
#[derive(Clone, Debug)]
pub struct HarnessConfig {
    /// Fixture file; `None` runs the built-in suite
    pub fixtures: Option<PathBuf>,

    pub report_path: PathBuf,
    pub chart_path: PathBuf,

    /// Markdown summary with the per-condition breakdown; `None` skips it
    pub markdown_path: Option<PathBuf>,

    /// Structured log file; `None` keeps the log in memory only
    pub log_path: Option<PathBuf>,

    pub backend: BackendChoice,
    pub backend_command: Option<BackendCommand>,

    /// Mock provider accuracy in [0, 1]
    pub accuracy: f64,

    /// Mock RNG seed (default: random)
    pub seed: Option<u64>,

    /// Fault injection plan
    pub failure: FailurePlan,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            fixtures: None,
            report_path: PathBuf::from(DEFAULT_REPORT_FILE),
            chart_path: PathBuf::from(DEFAULT_CHART_FILE),
            markdown_path: None,
            log_path: Some(PathBuf::from(DEFAULT_LOG_FILE)),
            backend: BackendChoice::Auto,
            backend_command: None,
            accuracy: DEFAULT_ACCURACY,
            seed: None,
            failure: FailurePlan::default(),
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
