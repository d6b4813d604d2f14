// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Report aggregation and tabular export.

use crate::engine::TestOutcome;
use crate::time::{Clock, ClockHandle};
use chrono::{DateTime, SecondsFormat, Utc};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use voxcheck_capture::{EventLog, LogLevel};

/// Column order of the tabular export
pub const CSV_HEADER: [&str; 7] = [
    "test_id",
    "input",
    "expected",
    "predicted",
    "confidence",
    "condition",
    "passed",
];

/// Errors from writing or reading the tabular export
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write report '{path}': {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Pass/fail counts for one condition tag
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConditionCounts {
    pub condition: String,
    pub passed: usize,
    pub failed: usize,
}

/// Aggregate view of one run
#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    /// Percentage in [0, 100]; 0 when there are no outcomes
    pub pass_rate: f64,
    pub provider: String,
    /// Mock substituted for an unavailable backend
    pub degraded: bool,
    pub generated_at: DateTime<Utc>,
    conditions: Vec<ConditionCounts>,
    failed_ids: Vec<u32>,
}

/// Compute the summary of an outcome log
pub fn summarize(
    outcomes: &[TestOutcome],
    provider: &str,
    degraded: bool,
    generated_at: DateTime<Utc>,
) -> Summary {
    let total = outcomes.len();
    let passed = outcomes.iter().filter(|o| o.passed).count();
    let failed = total - passed;
    let pass_rate = if total == 0 {
        0.0
    } else {
        100.0 * passed as f64 / total as f64
    };

    // First-appearance order keeps the breakdown aligned with the fixture suite
    let mut conditions: Vec<ConditionCounts> = Vec::new();
    for outcome in outcomes {
        let idx = match conditions
            .iter()
            .position(|c| c.condition == outcome.condition)
        {
            Some(idx) => idx,
            None => {
                conditions.push(ConditionCounts {
                    condition: outcome.condition.clone(),
                    passed: 0,
                    failed: 0,
                });
                conditions.len() - 1
            }
        };
        if outcome.passed {
            conditions[idx].passed += 1;
        } else {
            conditions[idx].failed += 1;
        }
    }

    Summary {
        total,
        passed,
        failed,
        pass_rate,
        provider: provider.to_string(),
        degraded,
        generated_at,
        conditions,
        failed_ids: outcomes
            .iter()
            .filter(|o| !o.passed)
            .map(|o| o.test_id)
            .collect(),
    }
}

impl Summary {
    /// Pass/fail counts per condition, in first-appearance order
    pub fn by_condition(&self) -> &[ConditionCounts] {
        &self.conditions
    }

    /// Ids of failed outcomes, in log order
    pub fn failed_ids(&self) -> &[u32] {
        &self.failed_ids
    }

    fn provider_label(&self) -> String {
        if self.degraded {
            format!("{} (demo mode)", self.provider)
        } else {
            self.provider.clone()
        }
    }

    /// Timestamped plain-text summary
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        text.push_str(&format!(
            "Validation Report - {}\n",
            self.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        ));
        text.push_str(&format!("Total Tests: {}\n", self.total));
        text.push_str(&format!("Pass Rate: {:.2}%\n", self.pass_rate));
        text.push_str(&format!("Failed Tests: {}\n", self.failed));
        text.push_str(&format!("Provider: {}\n", self.provider_label()));
        text
    }

    /// Markdown report with per-condition breakdown
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();
        md.push_str("# Validation Report\n\n");
        md.push_str(&format!(
            "Generated: {}\n",
            self.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        ));
        md.push_str(&format!("Provider: {}\n\n", self.provider_label()));

        md.push_str("## Summary\n\n");
        md.push_str(&format!("- Total: {}\n", self.total));
        md.push_str(&format!("- Passed: {}\n", self.passed));
        md.push_str(&format!("- Failed: {}\n", self.failed));
        md.push_str(&format!("- Pass Rate: {:.2}%\n\n", self.pass_rate));

        if !self.conditions.is_empty() {
            md.push_str("## By Condition\n\n");
            md.push_str("| Condition | Passed | Failed |\n");
            md.push_str("|-----------|--------|--------|\n");
            for c in &self.conditions {
                md.push_str(&format!("| {} | {} | {} |\n", c.condition, c.passed, c.failed));
            }
            md.push('\n');
        }

        if !self.failed_ids.is_empty() {
            let ids: Vec<String> = self.failed_ids.iter().map(|id| id.to_string()).collect();
            md.push_str(&format!("Failed test ids: {}\n", ids.join(", ")));
        }

        md
    }
}

/// Computes summaries and emits the summary log line
pub struct Aggregator {
    log: EventLog,
    clock: ClockHandle,
}

impl Aggregator {
    pub fn new(log: EventLog, clock: ClockHandle) -> Self {
        Self { log, clock }
    }

    /// Summarize the outcome log, stamped with the injected clock
    pub fn generate(&self, outcomes: &[TestOutcome], provider: &str, degraded: bool) -> Summary {
        let now = self.clock.now_utc();
        let summary = summarize(outcomes, provider, degraded, now);
        self.log
            .record_at(now, LogLevel::Info, summary.to_text().trim_end());
        summary
    }
}

/// Write the outcome log as CSV, header first, rows in log order
pub fn write_csv<W: Write>(outcomes: &[TestOutcome], writer: W) -> Result<(), ReportError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;
    for outcome in outcomes {
        csv_writer.serialize(outcome)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Parse a CSV export back into outcomes
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<TestOutcome>, ReportError> {
    let mut csv_reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
    let mut outcomes = Vec::new();
    for row in csv_reader.deserialize() {
        outcomes.push(row?);
    }
    Ok(outcomes)
}

/// Write the markdown summary, replacing any previous file at `path`
pub fn save_markdown(summary: &Summary, path: &Path) -> Result<(), ReportError> {
    std::fs::write(path, summary.to_markdown()).map_err(|source| ReportError::Persist {
        path: path.to_path_buf(),
        source,
    })
}

/// Persist the CSV export, replacing any previous file at `path`.
///
/// The file is written next to its destination and renamed into place, so a
/// failed export never leaves a truncated report behind. A new report gets
/// the usual umask-derived mode; a replaced one keeps its previous mode.
pub fn save_csv(outcomes: &[TestOutcome], path: &Path) -> Result<(), ReportError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let persist_err = |source: std::io::Error| ReportError::Persist {
        path: path.to_path_buf(),
        source,
    };

    let mut builder = tempfile::Builder::new();
    builder.prefix(".voxcheck-report");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let mut tmp = builder.tempfile_in(dir).map_err(persist_err)?;
    if let Ok(existing) = std::fs::metadata(path) {
        tmp.as_file()
            .set_permissions(existing.permissions())
            .map_err(persist_err)?;
    }

    write_csv(outcomes, tmp.as_file_mut())?;
    tmp.persist(path).map_err(|e| persist_err(e.error))?;
    Ok(())
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
