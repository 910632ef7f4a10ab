//! Command-line interface definitions for the `drydock` binary.
//!
//! This module centralises the clap parser structures so both the main
//! binary and the build script can reuse them when generating the manual
//! page.

use clap::{Parser, ValueEnum};

/// Top-level CLI for the `drydock` binary.
#[derive(Debug, Parser)]
#[command(
    name = "drydock",
    about = "Simulate a workflow node's runtime environment and run its smoke checks",
    arg_required_else_help = true
)]
pub(crate) enum Cli {
    /// Bootstrap the node runtime environment and run the registered suite.
    #[command(
        name = "run",
        about = "Bootstrap the node runtime environment and run the registered suite"
    )]
    Run(RunArgs),
    /// List the registered cases in execution order.
    #[command(name = "list", about = "List the registered cases in execution order")]
    List,
}

/// Arguments for the `drydock run` subcommand.
#[derive(Debug, Parser)]
pub(crate) struct RunArgs {
    /// Override the run-root directory exported to the suite.
    ///
    /// Without an override the run root is `<working directory>/artifacts`,
    /// or the configured `run_root` when one is set.
    #[arg(long, value_name = "PATH")]
    pub(crate) run_root: Option<String>,
    /// Report format printed to stdout.
    #[arg(long, value_enum, default_value = "text", value_name = "FORMAT")]
    pub(crate) format: ReportFormatArg,
    /// Write the JSON report to `<run root>/report.json` after the run.
    #[arg(long)]
    pub(crate) write_report: bool,
}

/// Report formats accepted by `--format`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub(crate) enum ReportFormatArg {
    /// Human-readable per-case lines plus a summary line.
    Text,
    /// Machine-readable JSON document.
    Json,
}
