// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Diagnostic output helpers for consistent error/warning formatting.
//!
//! Colors are used only when stderr is a terminal.

use std::io::{self, IsTerminal, Write};

/// Print an error message to stderr.
pub fn print_error(msg: impl std::fmt::Display) {
    let is_tty = io::stderr().is_terminal();
    write_error(&mut io::stderr(), msg, is_tty);
}

fn write_error<W: Write>(writer: &mut W, msg: impl std::fmt::Display, is_terminal: bool) {
    write_tagged(writer, "Error", 31, msg, is_terminal);
}

/// Print a warning message to stderr.
pub fn print_warning(msg: impl std::fmt::Display) {
    let is_tty = io::stderr().is_terminal();
    write_warning(&mut io::stderr(), msg, is_tty);
}

fn write_warning<W: Write>(writer: &mut W, msg: impl std::fmt::Display, is_terminal: bool) {
    write_tagged(writer, "Warning", 33, msg, is_terminal);
}

fn write_tagged<W: Write>(
    writer: &mut W,
    tag: &str,
    color: u8,
    msg: impl std::fmt::Display,
    is_terminal: bool,
) {
    if is_terminal {
        let _ = writeln!(writer, "\x1b[{}m{}: {}\x1b[0m", color, tag, msg);
    } else {
        let _ = writeln!(writer, "{}: {}", tag, msg);
    }
}

#[cfg(test)]
#[path = "diagnostic_tests.rs"]
mod tests;
