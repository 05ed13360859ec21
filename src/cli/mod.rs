//! The koan command-line launcher.
//!
//! This is a thin shell around the core engine: it parses arguments,
//! resolves any requested spec paths, selects a report formatter, runs
//! the suite, and maps the outcome to an exit status. Lookup failures
//! are rendered as miette diagnostics and terminate the process before
//! any testing begins.
//!
//! Exit status: 0 when every example passed, 1 when any example failed,
//! 2 when a spec path did not resolve or the report destination could
//! not be opened.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use termcolor::ColorChoice;

use crate::cli::args::{KoanArgs, ReportFormat};
use crate::diagnostics::KoanError;
use crate::format::{ConsoleFormatter, JsonFormatter, JunitFormatter};
use crate::runner::{RunSummary, Runner};

pub mod args;

/// Parses `std::env::args`, runs the suite, and exits.
pub fn run(runner: Runner) -> ! {
    let args = KoanArgs::parse();
    process::exit(run_with_args(runner, args))
}

/// Same as [`run`], but with explicit arguments and no process exit;
/// returns the exit status instead.
pub fn run_with_args(mut runner: Runner, args: KoanArgs) -> i32 {
    for path in &args.paths {
        if let Err(error) = runner.mark(path) {
            eprintln!("{:?}", miette::Report::new(error));
            return 2;
        }
    }
    let only_marked = !args.paths.is_empty();

    let summary = match execute(&mut runner, &args, only_marked) {
        Ok(summary) => summary,
        Err(error) => {
            eprintln!("{:?}", miette::Report::new(error));
            return 2;
        }
    };
    if summary.failed > 0 {
        1
    } else {
        0
    }
}

fn execute(
    runner: &mut Runner,
    args: &KoanArgs,
    only_marked: bool,
) -> Result<RunSummary, KoanError> {
    match args.format {
        ReportFormat::Console => match &args.output {
            None => {
                let choice = if args.no_color || !atty::is(atty::Stream::Stdout) {
                    ColorChoice::Never
                } else {
                    ColorChoice::Auto
                };
                let mut formatter = ConsoleFormatter::stdout(choice);
                Ok(runner.run_all(&mut formatter, only_marked))
            }
            Some(path) => {
                let mut formatter = ConsoleFormatter::plain(create_report_file(path)?);
                Ok(runner.run_all(&mut formatter, only_marked))
            }
        },
        ReportFormat::Json => {
            let mut formatter = JsonFormatter::new(report_sink(&args.output)?, args.pretty);
            Ok(runner.run_all(&mut formatter, only_marked))
        }
        ReportFormat::Junit => {
            let mut formatter = JunitFormatter::new(report_sink(&args.output)?);
            Ok(runner.run_all(&mut formatter, only_marked))
        }
    }
}

fn report_sink(output: &Option<PathBuf>) -> Result<Box<dyn Write>, KoanError> {
    match output {
        Some(path) => Ok(Box::new(create_report_file(path)?)),
        None => Ok(Box::new(io::stdout())),
    }
}

fn create_report_file(path: &Path) -> Result<File, KoanError> {
    File::create(path).map_err(|source| KoanError::Report {
        path: path.display().to_string(),
        source,
    })
}
