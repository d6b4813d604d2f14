// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Structured event log for validation runs.
//!
//! The harness injects an [`EventLog`] into the engine and aggregator instead
//! of relying on process-wide logging configuration. Records are kept in
//! memory for assertions, optionally appended to a JSONL file, and mirrored
//! to `tracing`.

mod log;
mod record;

pub use log::EventLog;
pub use record::{LogLevel, LogRecord};
