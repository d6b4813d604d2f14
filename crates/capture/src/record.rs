// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Log record data types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Severity of a log record
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Upper-case name as written in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One structured log line
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Sequence number within the log
    pub seq: u64,

    /// Wall-clock timestamp supplied by the caller's clock
    pub timestamp: DateTime<Utc>,

    /// Milliseconds since the log was opened
    pub elapsed_ms: u64,

    pub level: LogLevel,
    pub message: String,
}

impl LogRecord {
    /// Render as `timestamp - LEVEL - message`
    pub fn to_line(&self) -> String {
        format!(
            "{} - {} - {}",
            self.timestamp.to_rfc3339(),
            self.level,
            self.message
        )
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
