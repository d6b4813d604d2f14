// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Inference backends for the model-backed provider.

use crate::config::BackendCommand;
use crate::provider::{DependencyUnavailable, InferenceBackend, InferenceError};
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Backend that runs an external transcriber program.
///
/// The input is written to the program's stdin; its stdout (trimmed) is the
/// transcription.
#[derive(Clone, Debug)]
pub struct CommandBackend {
    name: String,
    program: PathBuf,
    args: Vec<String>,
}

impl CommandBackend {
    /// Resolve the program and build the backend.
    ///
    /// A program that cannot be found is a `DependencyUnavailable`.
    pub fn locate(command: &BackendCommand) -> Result<Self, DependencyUnavailable> {
        let program = resolve_program(&command.program).ok_or_else(|| {
            DependencyUnavailable::new(format!(
                "transcriber '{}' not found",
                command.program
            ))
        })?;
        let name = program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| command.program.clone());
        Ok(Self {
            name,
            program,
            args: command.args.clone(),
        })
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl InferenceBackend for CommandBackend {
    fn name(&self) -> &str {
        &self.name
    }

    fn transcribe(&mut self, input: &str) -> Result<String, InferenceError> {
        tracing::debug!(program = %self.program.display(), "spawning transcriber");
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| InferenceError::Unavailable(format!("{}: {}", self.name, e)))?;

        if let Some(mut stdin) = child.stdin.take() {
            // Exit status decides success even if the program ignores stdin
            let _ = stdin.write_all(input.as_bytes());
        }

        let output = child
            .wait_with_output()
            .map_err(|e| InferenceError::Backend(format!("{}: {}", self.name, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(InferenceError::Backend(format!(
                "{} exited with {}: {}",
                self.name,
                output.status,
                stderr.trim()
            )));
        }

        let transcription = String::from_utf8(output.stdout).map_err(|_| {
            InferenceError::Backend(format!("{} produced non-UTF-8 output", self.name))
        })?;
        Ok(transcription.trim().to_string())
    }
}

/// Find a program by path, or by name on `PATH`
fn resolve_program(program: &str) -> Option<PathBuf> {
    if program.is_empty() {
        return None;
    }

    let candidate = Path::new(program);
    if candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }

    let paths = std::env::var_os("PATH")?;
    std::env::split_paths(&paths)
        .map(|dir| dir.join(program))
        .find(|path| path.is_file())
}

/// In-process backend with canned transcriptions.
///
/// Unlisted inputs are echoed back unchanged, so the default instance
/// behaves like a perfect transcriber.
#[derive(Clone, Debug, Default)]
pub struct ScriptedBackend {
    responses: HashMap<String, String>,
    failures: HashMap<String, InferenceError>,
    calls: usize,
}

impl ScriptedBackend {
    /// Create a backend that echoes every input
    pub fn echo() -> Self {
        Self::default()
    }

    /// Return `transcription` for `input`
    pub fn with_response(
        mut self,
        input: impl Into<String>,
        transcription: impl Into<String>,
    ) -> Self {
        self.responses.insert(input.into(), transcription.into());
        self
    }

    /// Fail with `error` for `input`
    pub fn with_failure(mut self, input: impl Into<String>, error: InferenceError) -> Self {
        self.failures.insert(input.into(), error);
        self
    }

    /// Number of transcribe calls made
    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl InferenceBackend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    fn transcribe(&mut self, input: &str) -> Result<String, InferenceError> {
        self.calls += 1;
        if let Some(err) = self.failures.get(input) {
            return Err(err.clone());
        }
        Ok(self
            .responses
            .get(input)
            .cloned()
            .unwrap_or_else(|| input.to_string()))
    }
}

#[cfg(test)]
#[path = "backend_tests.rs"]
mod tests;
