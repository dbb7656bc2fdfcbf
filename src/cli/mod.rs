//! CLI module for the Scandi compiler front end
//!
//! This module provides the command-line interface for the compiler.
//!
//! ## Usage
//!
//! - `scandi <FILES>...` - Compile and print the code-generation trace
//! - `scandi -L lib/ main.scandi` - Compile every `*.scandi` under `lib/` first
//! - `scandi --lex <FILES>...` / `--parse` - Stop after a stage and dump its output
//!
//! ## Modules
//!
//! - `commands` - Command implementations
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::version::SCANDI_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
    /// Input could not be read or written.
    pub const IO: ExitCode = ExitCode(2);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }

    /// Create an I/O error (exit code 2).
    pub fn io(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::IO)
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Front end of the Scandi compiler
#[derive(Parser, Debug)]
#[command(name = "scandi")]
#[command(version = SCANDI_VERSION)]
#[command(about = "Front end of the Scandi compiler", long_about = None)]
pub struct Cli {
    /// Source files to compile
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<PathBuf>,

    /// Write the code-generation trace to FILE instead of stdout
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Library directory; every *.scandi file below it is compiled before FILES
    #[arg(short = 'L', long = "lib", value_name = "DIR")]
    pub libs: Vec<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    // Debug/development flags
    /// Tokenize only and print the tokens
    #[arg(long = "lex", conflicts_with = "parse")]
    pub lex: bool,

    /// Parse only and print the unresolved scope tree
    #[arg(long = "parse")]
    pub parse: bool,
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Install the `tracing` subscriber. `RUST_LOG` wins over `--debug`.
pub fn init_logging(debug: bool) {
    let default = if debug { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .try_init();
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    let units = commands::load_units(&cli.files, &cli.libs)?;
    tracing::debug!(units = units.len(), "loaded compilation units");

    if cli.lex {
        return commands::lex_units(&units);
    }
    if cli.parse {
        return commands::parse_units(&units);
    }
    commands::compile_units(&units, cli.output.as_deref())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_files_and_output() {
        let cli = Cli::try_parse_from(["scandi", "a.scandi", "b.scandi", "-o", "out.trace"]).unwrap();
        assert_eq!(cli.files.len(), 2);
        assert_eq!(cli.output, Some(PathBuf::from("out.trace")));
        assert!(!cli.lex && !cli.parse && !cli.debug);
    }

    #[test]
    fn test_cli_parse_repeated_libs() {
        let cli = Cli::try_parse_from(["scandi", "-L", "std", "--lib", "vendor", "main.scandi"]).unwrap();
        assert_eq!(cli.libs, vec![PathBuf::from("std"), PathBuf::from("vendor")]);
    }

    #[test]
    fn test_cli_parse_debug_flags() {
        let cli = Cli::try_parse_from(["scandi", "--lex", "main.scandi"]).unwrap();
        assert!(cli.lex);

        let cli = Cli::try_parse_from(["scandi", "--parse", "--debug", "main.scandi"]).unwrap();
        assert!(cli.parse);
        assert!(cli.debug);
    }

    #[test]
    fn test_cli_rejects_conflicting_stages() {
        assert!(Cli::try_parse_from(["scandi", "--lex", "--parse", "main.scandi"]).is_err());
    }

    #[test]
    fn test_cli_requires_a_file() {
        assert!(Cli::try_parse_from(["scandi"]).is_err());
    }
}
