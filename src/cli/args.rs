//! Defines the command-line arguments for koan suite runners.
//!
//! This module uses the `clap` crate with its "derive" feature to create
//! a declarative and type-safe argument parsing structure. A consumer
//! binary registers its specs on a `Runner` and hands both to
//! [`crate::cli::run`].

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "koan",
    version,
    about = "Run a koan spec suite and report the results."
)]
pub struct KoanArgs {
    /// Slash-delimited spec paths to run (e.g. 'arithmetic/division').
    /// Runs the whole suite when empty.
    pub paths: Vec<String>,

    /// Report format.
    #[arg(long, value_enum, default_value = "console")]
    pub format: ReportFormat,

    /// Write the report to a file instead of standard output.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Disable colored console output.
    #[arg(long)]
    pub no_color: bool,

    /// Pretty-print the JSON report.
    #[arg(long)]
    pub pretty: bool,
}

/// An enumeration of the available report renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Indented tree with colored pass/fail lines.
    Console,
    /// Nested JSON document.
    Json,
    /// JUnit-compatible XML.
    Junit,
}
