// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Voice command classifier validation harness.
//!
//! Runs a fixed suite of labelled utterances through a classifier provider,
//! records one outcome per fixture, and exports a CSV report, a pass/fail
//! bar chart, and a text summary. When the model backend is unavailable the
//! harness falls back to a seeded mock provider and marks the run as demo
//! mode.
//!
//! ```no_run
//! use voxcheck::config::{BackendChoice, HarnessConfig};
//! use voxcheck::harness::Harness;
//!
//! let config = HarnessConfig {
//!     backend: BackendChoice::Mock,
//!     seed: Some(7),
//!     ..Default::default()
//! };
//! let run = Harness::from_config(config)?.run()?;
//! print!("{}", run.summary.to_text());
//! # Ok::<(), voxcheck::harness::HarnessError>(())
//! ```

pub mod backend;
/// Re-exported log types from the voxcheck-capture crate.
pub mod capture {
    pub use voxcheck_capture::{EventLog, LogLevel, LogRecord};
}
pub mod chart;
#[doc(hidden)]
pub mod cli;
pub mod config;
#[doc(hidden)]
pub mod diagnostic;
pub mod engine;
pub mod failure;
pub mod fixtures;
pub mod harness;
pub mod provider;
pub mod report;
pub mod time;
