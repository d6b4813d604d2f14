// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use chrono::TimeZone;

fn make_record(level: LogLevel, message: &str) -> LogRecord {
    LogRecord {
        seq: 3,
        timestamp: Utc.with_ymd_and_hms(2026, 1, 15, 10, 30, 0).unwrap(),
        elapsed_ms: 1500,
        level,
        message: message.to_string(),
    }
}

#[test]
fn test_level_serializes_uppercase() {
    assert_eq!(serde_json::to_string(&LogLevel::Info).unwrap(), "\"INFO\"");
    assert_eq!(serde_json::to_string(&LogLevel::Warn).unwrap(), "\"WARN\"");
    assert_eq!(serde_json::to_string(&LogLevel::Error).unwrap(), "\"ERROR\"");
}

#[test]
fn test_record_json_fields() {
    let record = make_record(LogLevel::Info, "Test ID 1: Passed=true");
    let json: serde_json::Value = serde_json::to_value(&record).unwrap();

    assert_eq!(json["seq"], 3);
    assert_eq!(json["level"], "INFO");
    assert_eq!(json["message"], "Test ID 1: Passed=true");
    assert_eq!(json["timestamp"], "2026-01-15T10:30:00Z");
    assert_eq!(json["elapsed_ms"], 1500);
}

#[test]
fn test_record_deserializes() {
    let record = make_record(LogLevel::Error, "boom");
    let json = serde_json::to_string(&record).unwrap();
    let parsed: LogRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, record);
}

#[test]
fn test_to_line() {
    let record = make_record(LogLevel::Warn, "backend missing");
    assert_eq!(
        record.to_line(),
        "2026-01-15T10:30:00+00:00 - WARN - backend missing"
    );
}
