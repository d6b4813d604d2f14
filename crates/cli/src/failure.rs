// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Failure injection for exercising the engine's isolation policy.

use crate::provider::{Classifier, InferenceError, Prediction};
use std::collections::BTreeSet;

/// Kind of error to inject
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FailureMode {
    /// Backend reports an inference failure
    #[default]
    BackendError,
    /// Input rejected as malformed
    MalformedInput,
    /// Backend became unreachable mid-run
    BackendUnavailable,
}

impl FailureMode {
    /// Build the injected error for an input
    pub fn to_error(self, input: &str) -> InferenceError {
        match self {
            FailureMode::BackendError => {
                InferenceError::Backend(format!("injected failure for '{}'", input))
            }
            FailureMode::MalformedInput => {
                InferenceError::MalformedInput(format!("injected rejection of '{}'", input))
            }
            FailureMode::BackendUnavailable => {
                InferenceError::Unavailable("injected outage".to_string())
            }
        }
    }
}

/// Which calls fail, and how
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FailurePlan {
    /// 1-based call positions that fail
    pub fail_on: BTreeSet<usize>,
    pub mode: FailureMode,
}

impl FailurePlan {
    pub fn new(fail_on: impl IntoIterator<Item = usize>, mode: FailureMode) -> Self {
        Self {
            fail_on: fail_on.into_iter().collect(),
            mode,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fail_on.is_empty()
    }
}

/// Classifier wrapper that fails on planned call positions and delegates
/// every other call.
#[derive(Debug)]
pub struct FaultInjector<C> {
    inner: C,
    plan: FailurePlan,
    calls: usize,
}

impl<C: Classifier> FaultInjector<C> {
    pub fn new(inner: C, plan: FailurePlan) -> Self {
        Self {
            inner,
            plan,
            calls: 0,
        }
    }

    /// Wrap without injecting anything
    pub fn passthrough(inner: C) -> Self {
        Self::new(inner, FailurePlan::default())
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C: Classifier> Classifier for FaultInjector<C> {
    fn predict(&mut self, input: &str) -> Result<Prediction, InferenceError> {
        self.calls += 1;
        if self.plan.fail_on.contains(&self.calls) {
            return Err(self.plan.mode.to_error(input));
        }
        self.inner.predict(input)
    }

    fn identity(&self) -> String {
        self.inner.identity()
    }
}

#[cfg(test)]
#[path = "failure_tests.rs"]
mod tests;
