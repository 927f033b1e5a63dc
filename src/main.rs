//! Typegraph - graph algorithms over typed property graphs
//!
//! Walks, connected components and single-pair shortest paths over graphs
//! described as JSON documents.

mod cli;
mod commands;

use std::env;
use std::process::ExitCode;
use std::time::Instant;

use clap::error::ErrorKind;
use clap::Parser;

use cli::{Cli, OutputFormat};
use typegraph_core::error::{ExitCode as GraphExitCode, GraphError};
use typegraph_core::logging;

fn main() -> ExitCode {
    let start = Instant::now();
    let requested = RequestedFormats::from_args(env::args().skip(1));

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // without JSON on the command line clap prints its own message
        Err(err) if !requested.json() => err.exit(),
        Err(err) => {
            let Some(error) = requested.parse_error(&err) else {
                err.exit();
            };
            eprintln!("{}", error.to_json());
            return exit_code(&error);
        }
    };

    if let Err(e) = logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }
    tracing::debug!(elapsed = ?start.elapsed(), "parse_args");

    match commands::dispatch::run(&cli, start) {
        Ok(()) => ExitCode::from(GraphExitCode::Success as u8),
        Err(e) => {
            if cli.format == Some(OutputFormat::Json) || requested.json() {
                eprintln!("{}", e.to_json());
            } else if !cli.quiet {
                eprintln!("error: {}", e);
            }
            exit_code(&e)
        }
    }
}

fn exit_code(error: &GraphError) -> ExitCode {
    ExitCode::from(error.exit_code() as u8)
}

/// `--format` values seen on the raw command line
///
/// clap can reject the arguments before `Cli.format` exists, so JSON error
/// output has to be decided from argv.
#[derive(Debug, Default)]
struct RequestedFormats(Vec<String>);

impl RequestedFormats {
    fn from_args(args: impl IntoIterator<Item = String>) -> Self {
        let mut formats = Vec::new();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            if arg == "--format" {
                formats.extend(args.next());
            } else if let Some(value) = arg.strip_prefix("--format=") {
                formats.push(value.to_string());
            }
        }
        Self(formats)
    }

    fn json(&self) -> bool {
        self.0.iter().any(|format| format == "json")
    }

    /// Parse failure as a usage error; `None` for help and version output
    fn parse_error(&self, err: &clap::Error) -> Option<GraphError> {
        let error = match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => return None,
            ErrorKind::ArgumentConflict if self.0.len() > 1 => GraphError::UsageError(format!(
                "--format given more than once ({})",
                self.0.join(", ")
            )),
            ErrorKind::ValueValidation
            | ErrorKind::InvalidValue
            | ErrorKind::InvalidSubcommand
            | ErrorKind::UnknownArgument
            | ErrorKind::ArgumentConflict
            | ErrorKind::MissingRequiredArgument => GraphError::UsageError(err.to_string()),
            _ => GraphError::Other(err.to_string()),
        };
        Some(error)
    }
}
