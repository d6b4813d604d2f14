// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Validation harness binary entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use voxcheck::cli::Cli;
use voxcheck::diagnostic::{print_error, print_warning};
use voxcheck::harness::Harness;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let harness = match Harness::from_config(cli.to_config()) {
        Ok(harness) => harness,
        Err(e) => {
            print_error(e);
            std::process::exit(1);
        }
    };

    let run = match harness.run() {
        Ok(run) => run,
        Err(e) => {
            print_error(e);
            std::process::exit(1);
        }
    };

    print!("{}", run.summary.to_text());

    if run.summary.degraded {
        print_warning("Model backend unavailable; results come from the mock provider");
    }
    if let Err(ref e) = run.report {
        print_error(e);
    }
    if let Err(ref e) = run.chart {
        print_error(e);
    }
    if let Some(Err(ref e)) = run.markdown {
        print_error(e);
    }

    // Pass rate never affects the exit status; only failed exports do
    if !run.exports_ok() {
        std::process::exit(1);
    }
    Ok(())
}
