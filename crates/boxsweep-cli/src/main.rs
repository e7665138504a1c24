// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Boxsweep CLI entrypoint.
//!
//! ```text
//! boxsweep run    [--config FILE | --boxes FILE] [--count N] [--seed S] [--json] [--pairs]
//! boxsweep verify [scene options]
//! boxsweep bench  [scene options] [--iterations K] [--skip-oracle]
//! boxsweep config [scene options]
//! ```
//!
//! Exits `0` on success and non-zero on error, including when `verify` finds
//! a disagreement between the sweep and the all-pairs oracle.

// The CLI is expected to print to stdout/stderr.
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;
mod commands;
mod scene;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(default_level.parse()?))
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Command::Run(args) => commands::run(args),
        Command::Verify(args) => commands::verify(args),
        Command::Bench(args) => commands::bench(args),
        Command::Config(args) => commands::config(args),
    }
}
