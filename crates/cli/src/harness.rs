// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! One validation run: fixtures, provider selection, engine, report, chart.

use crate::backend::CommandBackend;
use crate::chart::{save_chart, ChartData, ChartError};
use crate::config::{BackendChoice, HarnessConfig};
use crate::engine::{TestOutcome, ValidationEngine};
use crate::failure::FaultInjector;
use crate::fixtures::{builtin_fixtures, load_fixtures, validate_fixtures, FixtureError, TestCase};
use crate::provider::{
    BackendAvailability, Classifier, DependencyUnavailable, MockProvider, Provider,
    ProviderConfigError, ProviderSelection,
};
use crate::report::{save_csv, save_markdown, Aggregator, ReportError, Summary};
use crate::time::{Clock, ClockHandle};
use std::path::PathBuf;
use thiserror::Error;
use voxcheck_capture::{EventLog, LogLevel};

/// Errors that stop a run before any fixture executes
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("Invalid fixtures: {0}")]
    Fixtures(#[from] FixtureError),

    #[error("Invalid provider configuration: {0}")]
    Provider(#[from] ProviderConfigError),

    #[error("Model backend required: {0}")]
    BackendRequired(#[from] DependencyUnavailable),

    #[error("Failed to open log file '{path}': {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Everything a run produced.
///
/// Export results are kept separately so a failed CSV or chart write never
/// hides the outcomes and summary already computed.
#[derive(Debug)]
pub struct RunReport {
    pub outcomes: Vec<TestOutcome>,
    pub summary: Summary,
    pub report: Result<PathBuf, ReportError>,
    pub chart: Result<ChartData, ChartError>,
    /// Markdown summary export, when one was configured
    pub markdown: Option<Result<PathBuf, ReportError>>,
}

impl RunReport {
    /// Whether every attempted export succeeded
    pub fn exports_ok(&self) -> bool {
        self.report.is_ok()
            && self.chart.is_ok()
            && !matches!(self.markdown, Some(Err(_)))
    }
}

/// Validation harness for a resolved configuration
pub struct Harness {
    config: HarnessConfig,
    log: EventLog,
    clock: ClockHandle,
}

impl Harness {
    /// Create a harness with an injected log and clock
    pub fn new(config: HarnessConfig, log: EventLog, clock: ClockHandle) -> Self {
        Self { config, log, clock }
    }

    /// Create a harness logging to the configured file and the system clock
    pub fn from_config(config: HarnessConfig) -> Result<Self, HarnessError> {
        let log = match config.log_path {
            Some(ref path) => {
                EventLog::with_file(path).map_err(|source| HarnessError::LogFile {
                    path: path.clone(),
                    source,
                })?
            }
            None => EventLog::new(),
        };
        Ok(Self::new(config, log, ClockHandle::system()))
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// Fixtures for this run: the configured file, or the built-in suite
    pub fn load_fixtures(&self) -> Result<Vec<TestCase>, HarnessError> {
        let cases = match self.config.fixtures {
            Some(ref path) => load_fixtures(path)?,
            None => builtin_fixtures(),
        };
        validate_fixtures(&cases)?;
        Ok(cases)
    }

    /// Check whether the configured backend can run
    pub fn check_backend(&self) -> BackendAvailability {
        match self.config.backend_command {
            Some(ref command) => match CommandBackend::locate(command) {
                Ok(backend) => BackendAvailability::Available(Box::new(backend)),
                Err(reason) => BackendAvailability::Unavailable(reason),
            },
            None => BackendAvailability::Unavailable(DependencyUnavailable::new(
                "no transcriber command configured",
            )),
        }
    }

    /// Choose the provider once for this run
    pub fn select_provider(&self) -> Result<ProviderSelection, HarnessError> {
        let mock = match self.config.seed {
            Some(seed) => MockProvider::seeded(self.config.accuracy, seed)?,
            None => MockProvider::new(self.config.accuracy, fastrand::Rng::new())?,
        };

        match self.config.backend {
            BackendChoice::Mock => Ok(ProviderSelection {
                provider: Provider::Mock(mock),
                degraded: None,
            }),
            BackendChoice::Auto => Ok(Provider::select(
                self.check_backend(),
                mock,
                &self.log,
                &self.clock,
            )),
            BackendChoice::Model => match self.check_backend() {
                BackendAvailability::Unavailable(reason) => Err(reason.into()),
                available => Ok(Provider::select(available, mock, &self.log, &self.clock)),
            },
        }
    }

    /// Run the full pipeline.
    ///
    /// Fixture and provider errors abort before execution. Export failures
    /// are returned inside the `RunReport`.
    pub fn run(&self) -> Result<RunReport, HarnessError> {
        let cases = self.load_fixtures()?;
        let selection = self.select_provider()?;
        let degraded = selection.is_degraded();
        let classifier = FaultInjector::new(selection.provider, self.config.failure.clone());
        self.run_with(classifier, &cases, degraded)
    }

    /// Run fixtures through a given classifier, then aggregate and export.
    ///
    /// The fixtures are validated first, so none of them can expect the
    /// error label.
    pub fn run_with<C: Classifier>(
        &self,
        classifier: C,
        cases: &[TestCase],
        degraded: bool,
    ) -> Result<RunReport, HarnessError> {
        validate_fixtures(cases)?;
        let mut engine = ValidationEngine::new(classifier, self.log.clone(), self.clock.clone());
        let identity = engine.classifier().identity();
        tracing::debug!(fixtures = cases.len(), provider = %identity, degraded, "starting run");
        engine.run(cases);
        let outcomes = engine.into_outcomes();

        let aggregator = Aggregator::new(self.log.clone(), self.clock.clone());
        let summary = aggregator.generate(&outcomes, &identity, degraded);

        let report_path = self.config.report_path.clone();
        let report = save_csv(&outcomes, &report_path).map(|()| report_path);
        match report {
            Ok(ref path) => {
                self.note(LogLevel::Info, format!("Report saved to {}", path.display()))
            }
            Err(ref e) => self.note(LogLevel::Error, e.to_string()),
        }

        let chart = save_chart(&outcomes, &self.config.chart_path);
        match chart {
            Ok(_) => self.note(
                LogLevel::Info,
                format!("Visualization saved to {}", self.config.chart_path.display()),
            ),
            Err(ref e) => self.note(LogLevel::Error, e.to_string()),
        }

        let markdown = self.config.markdown_path.clone().map(|path| {
            let result = save_markdown(&summary, &path).map(|()| path);
            match result {
                Ok(ref path) => self.note(
                    LogLevel::Info,
                    format!("Markdown summary saved to {}", path.display()),
                ),
                Err(ref e) => self.note(LogLevel::Error, e.to_string()),
            }
            result
        });

        Ok(RunReport {
            outcomes,
            summary,
            report,
            chart,
            markdown,
        })
    }

    fn note(&self, level: LogLevel, message: String) {
        self.log.record_at(self.clock.now_utc(), level, message);
    }
}

#[cfg(test)]
#[path = "harness_tests.rs"]
mod tests;
