// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;

fn command(program: &str, args: &[&str]) -> BackendCommand {
    BackendCommand {
        program: program.to_string(),
        args: args.iter().map(|a| a.to_string()).collect(),
    }
}

#[test]
fn test_locate_missing_program() {
    let err = CommandBackend::locate(&command("voxcheck-no-such-transcriber", &[])).unwrap_err();
    assert!(err.reason.contains("voxcheck-no-such-transcriber"));
}

#[test]
fn test_locate_missing_path() {
    assert!(CommandBackend::locate(&command("/nonexistent/bin/transcriber", &[])).is_err());
}

#[test]
fn test_locate_empty_program() {
    assert!(CommandBackend::locate(&command("", &[])).is_err());
}

#[cfg(unix)]
#[test]
fn test_command_backend_echoes_stdin() {
    let mut backend = CommandBackend::locate(&command("cat", &[])).unwrap();
    assert_eq!(backend.name(), "cat");
    assert_eq!(backend.transcribe("Play Music\n").unwrap(), "Play Music");
}

#[cfg(unix)]
#[test]
fn test_command_backend_with_args() {
    let mut backend =
        CommandBackend::locate(&command("sh", &["-c", "echo call contact"])).unwrap();
    assert_eq!(backend.transcribe("anything").unwrap(), "call contact");
}

#[cfg(unix)]
#[test]
fn test_command_backend_nonzero_exit() {
    let mut backend =
        CommandBackend::locate(&command("sh", &["-c", "echo model crashed >&2; exit 3"])).unwrap();
    match backend.transcribe("stop") {
        Err(InferenceError::Backend(msg)) => assert!(msg.contains("model crashed")),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_scripted_echo() {
    let mut backend = ScriptedBackend::echo();
    assert_eq!(backend.transcribe("navigate to office").unwrap(), "navigate to office");
    assert_eq!(backend.calls(), 1);
}

#[test]
fn test_scripted_responses_and_failures() {
    let mut backend = ScriptedBackend::echo()
        .with_response("spiele musik", "play music")
        .with_failure("static", InferenceError::Backend("noise".to_string()));

    assert_eq!(backend.transcribe("spiele musik").unwrap(), "play music");
    assert_eq!(
        backend.transcribe("static"),
        Err(InferenceError::Backend("noise".to_string()))
    );
    assert_eq!(backend.calls(), 2);
}
