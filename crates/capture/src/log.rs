// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Event log implementation.

use crate::record::{LogLevel, LogRecord};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Append-only structured log for a validation run
pub struct EventLog {
    start: Instant,
    records: Arc<Mutex<Vec<LogRecord>>>,
    file_writer: Option<Arc<Mutex<BufWriter<File>>>>,
}

impl EventLog {
    /// Create a new in-memory event log
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            records: Arc::new(Mutex::new(Vec::new())),
            file_writer: None,
        }
    }

    /// Create an event log that also writes to a file (JSONL format).
    ///
    /// An existing file is truncated, so each run starts a fresh log.
    pub fn with_file(path: &Path) -> std::io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self {
            start: Instant::now(),
            records: Arc::new(Mutex::new(Vec::new())),
            file_writer: Some(Arc::new(Mutex::new(BufWriter::new(file)))),
        })
    }

    /// Record an info line stamped with the current system time
    pub fn info(&self, message: impl Into<String>) -> LogRecord {
        self.record_at(Utc::now(), LogLevel::Info, message)
    }

    /// Record a warning line stamped with the current system time
    pub fn warn(&self, message: impl Into<String>) -> LogRecord {
        self.record_at(Utc::now(), LogLevel::Warn, message)
    }

    /// Record an error line stamped with the current system time
    pub fn error(&self, message: impl Into<String>) -> LogRecord {
        self.record_at(Utc::now(), LogLevel::Error, message)
    }

    /// Record a line with an explicit timestamp
    pub fn record_at(
        &self,
        timestamp: DateTime<Utc>,
        level: LogLevel,
        message: impl Into<String>,
    ) -> LogRecord {
        let mut records = self.records.lock();
        let record = LogRecord {
            seq: records.len() as u64,
            timestamp,
            elapsed_ms: self.start.elapsed().as_millis() as u64,
            level,
            message: message.into(),
        };

        match level {
            LogLevel::Info => tracing::info!(seq = record.seq, "{}", record.message),
            LogLevel::Warn => tracing::warn!(seq = record.seq, "{}", record.message),
            LogLevel::Error => tracing::error!(seq = record.seq, "{}", record.message),
        }

        records.push(record.clone());

        // File sink errors are ignored; the in-memory records are authoritative
        if let Some(ref writer) = self.file_writer {
            use std::io::Write;
            let mut w = writer.lock();
            if let Ok(json) = serde_json::to_string(&record) {
                let _ = writeln!(w, "{}", json);
                let _ = w.flush();
            }
        }

        record
    }

    /// Get all records
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().clone()
    }

    /// Get the last N records
    pub fn last(&self, n: usize) -> Vec<LogRecord> {
        let all = self.records.lock();
        all.iter().rev().take(n).rev().cloned().collect()
    }

    /// Count records matching a predicate
    pub fn count<F: Fn(&LogRecord) -> bool>(&self, pred: F) -> usize {
        self.records.lock().iter().filter(|r| pred(r)).count()
    }

    /// Find records at a given level
    pub fn find_by_level(&self, level: LogLevel) -> Vec<LogRecord> {
        self.records
            .lock()
            .iter()
            .filter(|r| r.level == level)
            .cloned()
            .collect()
    }

    /// Find records whose message contains a substring
    pub fn find_by_message(&self, pattern: &str) -> Vec<LogRecord> {
        self.records
            .lock()
            .iter()
            .filter(|r| r.message.contains(pattern))
            .cloned()
            .collect()
    }

    /// Get the total number of records
    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// Clear all in-memory records
    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for EventLog {
    fn clone(&self) -> Self {
        Self {
            start: self.start,
            records: Arc::clone(&self.records),
            file_writer: self.file_writer.as_ref().map(Arc::clone),
        }
    }
}

impl std::fmt::Debug for EventLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventLog")
            .field("records", &self.len())
            .field("file", &self.file_writer.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
