// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line arguments for the validation harness.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{
    BackendChoice, BackendCommand, HarnessConfig, DEFAULT_ACCURACY, DEFAULT_CHART_FILE,
    DEFAULT_LOG_FILE, DEFAULT_REPORT_FILE,
};
use crate::failure::{FailureMode, FailurePlan};

/// Voice command classifier validation harness
#[derive(Parser, Debug, Clone)]
#[command(name = "voxcheck", version, about = "Voice command classifier validation harness")]
pub struct Cli {
    /// Fixture file (TOML or JSON); runs the built-in suite when omitted
    #[arg(long, env = "VOXCHECK_FIXTURES")]
    pub fixtures: Option<PathBuf>,

    /// CSV report destination
    #[arg(long, env = "VOXCHECK_REPORT", default_value = DEFAULT_REPORT_FILE)]
    pub report: PathBuf,

    /// PNG chart destination
    #[arg(long, env = "VOXCHECK_CHART", default_value = DEFAULT_CHART_FILE)]
    pub chart: PathBuf,

    /// Markdown summary with the per-condition breakdown
    #[arg(long, env = "VOXCHECK_MARKDOWN")]
    pub markdown: Option<PathBuf>,

    /// Structured JSONL log file
    #[arg(long, env = "VOXCHECK_LOG_FILE", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Keep the structured log in memory only (takes precedence over --log-file)
    #[arg(long)]
    pub no_log_file: bool,

    /// Which classifier provider to use
    #[arg(long, value_enum, env = "VOXCHECK_BACKEND", default_value = "auto")]
    pub backend: CliBackend,

    /// Transcriber program for the model backend
    #[arg(long, env = "VOXCHECK_BACKEND_CMD")]
    pub backend_cmd: Option<String>,

    /// Argument passed to the transcriber (can be specified multiple times)
    #[arg(long = "backend-arg", requires = "backend_cmd", allow_hyphen_values = true)]
    pub backend_args: Vec<String>,

    /// Mock provider accuracy in [0, 1]
    #[arg(long, env = "VOXCHECK_ACCURACY", default_value_t = DEFAULT_ACCURACY)]
    pub accuracy: f64,

    /// Mock provider RNG seed
    #[arg(long, env = "VOXCHECK_SEED")]
    pub seed: Option<u64>,

    /// Fail these 1-based classifier calls (comma separated)
    #[arg(long, env = "VOXCHECK_FAIL_ON", value_delimiter = ',')]
    pub fail_on: Vec<usize>,

    /// Error injected for --fail-on calls
    #[arg(long, value_enum, env = "VOXCHECK_FAILURE", default_value = "backend-error")]
    pub failure: CliFailureMode,
}

/// CLI-friendly backend choice
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CliBackend {
    /// Model backend when available, otherwise the mock (demo mode)
    Auto,
    /// Always the mock provider
    Mock,
    /// Require the model backend
    Model,
}

impl From<CliBackend> for BackendChoice {
    fn from(backend: CliBackend) -> Self {
        match backend {
            CliBackend::Auto => BackendChoice::Auto,
            CliBackend::Mock => BackendChoice::Mock,
            CliBackend::Model => BackendChoice::Model,
        }
    }
}

/// Failure modes that can be injected
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum CliFailureMode {
    /// Backend reports an inference failure
    BackendError,
    /// Input rejected as malformed
    MalformedInput,
    /// Backend unreachable
    BackendUnavailable,
}

impl From<CliFailureMode> for FailureMode {
    fn from(mode: CliFailureMode) -> Self {
        match mode {
            CliFailureMode::BackendError => FailureMode::BackendError,
            CliFailureMode::MalformedInput => FailureMode::MalformedInput,
            CliFailureMode::BackendUnavailable => FailureMode::BackendUnavailable,
        }
    }
}

impl Cli {
    /// Resolve arguments into harness settings
    pub fn to_config(&self) -> HarnessConfig {
        HarnessConfig {
            fixtures: self.fixtures.clone(),
            report_path: self.report.clone(),
            chart_path: self.chart.clone(),
            markdown_path: self.markdown.clone(),
            log_path: (!self.no_log_file).then(|| self.log_file.clone()),
            backend: self.backend.into(),
            backend_command: self.backend_cmd.as_ref().map(|program| BackendCommand {
                program: program.clone(),
                args: self.backend_args.clone(),
            }),
            accuracy: self.accuracy,
            seed: self.seed,
            failure: FailurePlan::new(self.fail_on.iter().copied(), self.failure.into()),
        }
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
