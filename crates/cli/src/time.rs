// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Timestamps for log lines and report summaries.
//!
//! Everything that stamps a record reads a [`Clock`], so tests can pin the
//! run's timestamps with a [`FakeClock`].

use chrono::{DateTime, TimeDelta, Utc};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// Source of UTC timestamps
pub trait Clock: Send + Sync {
    fn now_utc(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Manually driven clock.
///
/// Clones share the same instant. With a non-zero step, every read moves
/// the clock forward so consecutive records get distinct timestamps.
#[derive(Clone, Debug)]
pub struct FakeClock {
    millis: Arc<AtomicI64>,
    step_ms: i64,
}

impl FakeClock {
    /// Clock frozen at `millis` since the Unix epoch
    pub fn from_millis(millis: i64) -> Self {
        Self {
            millis: Arc::new(AtomicI64::new(millis)),
            step_ms: 0,
        }
    }

    /// Clock frozen at `at`
    pub fn new(at: DateTime<Utc>) -> Self {
        Self::from_millis(at.timestamp_millis())
    }

    /// Advance by `step` after every read
    pub fn with_step(mut self, step: TimeDelta) -> Self {
        self.step_ms = step.num_milliseconds();
        self
    }

    pub fn advance(&self, delta: TimeDelta) {
        self.millis
            .fetch_add(delta.num_milliseconds(), Ordering::SeqCst);
    }

    pub fn set(&self, at: DateTime<Utc>) {
        self.millis.store(at.timestamp_millis(), Ordering::SeqCst);
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::from_millis(0)
    }
}

impl Clock for FakeClock {
    fn now_utc(&self) -> DateTime<Utc> {
        let millis = self.millis.fetch_add(self.step_ms, Ordering::SeqCst);
        DateTime::from_timestamp_millis(millis).unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }
}

/// Clock handle passed to the engine, aggregator and harness
#[derive(Clone, Debug)]
pub enum ClockHandle {
    System(SystemClock),
    Fake(FakeClock),
}

impl ClockHandle {
    pub fn system() -> Self {
        Self::System(SystemClock)
    }

    /// Frozen fake clock at `millis` since the Unix epoch
    pub fn fake_at(millis: i64) -> Self {
        Self::Fake(FakeClock::from_millis(millis))
    }

    pub fn as_fake(&self) -> Option<&FakeClock> {
        match self {
            Self::Fake(f) => Some(f),
            Self::System(_) => None,
        }
    }
}

impl Clock for ClockHandle {
    fn now_utc(&self) -> DateTime<Utc> {
        match self {
            Self::System(c) => c.now_utc(),
            Self::Fake(c) => c.now_utc(),
        }
    }
}

impl Default for ClockHandle {
    fn default() -> Self {
        Self::system()
    }
}

#[cfg(test)]
#[path = "time_tests.rs"]
mod tests;
