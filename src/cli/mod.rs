//! CLI module for the goshift translator
//!
//! ## Commands
//!
//! - `translate <TREE>` - Translate a serialized syntax tree into a target
//! - `targets` - List registered targets
//! - `dump <TREE>` - Pretty-print a loaded tree (debug)
//!
//! ## Modules
//!
//! - `commands` - Command implementations
//! - `load` - JSON tree loading and load diagnostics
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
pub mod load;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use crate::emit::EmitConfig;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
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
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Translate Go syntax trees into other target syntaxes
#[derive(Parser, Debug)]
#[command(name = "goshift")]
#[command(version = VERSION)]
#[command(about = "Translate Go syntax trees into other target syntaxes", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Translate a serialized syntax tree
    Translate {
        /// JSON syntax tree produced by the parser
        #[arg(value_name = "TREE")]
        file: PathBuf,
        /// Target to translate into (see `goshift targets`)
        #[arg(short, long, default_value = "cpp")]
        target: String,
        /// Spaces per indentation level
        #[arg(long, value_name = "N", default_value_t = 2,
              value_parser = clap::value_parser!(u8).range(1..=16))]
        indent: u8,
        /// Do not separate top-level declarations with a blank line
        #[arg(long)]
        compact: bool,
        /// Include byte spans in placeholder comments
        #[arg(long)]
        positions: bool,
        /// Write output to FILE instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// List registered targets
    Targets,

    /// Pretty-print a loaded syntax tree (debug)
    Dump {
        #[arg(value_name = "TREE")]
        file: PathBuf,
    },
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

/// Execute the CLI command and return result.
pub fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Translate {
            file,
            target,
            indent,
            compact,
            positions,
            output,
        } => {
            let config = EmitConfig::new()
                .with_indent_width(usize::from(indent))
                .with_blank_line_between_decls(!compact)
                .with_position_comments(positions);
            commands::translate_file(&file, &target, config, output.as_deref())
        }
        Command::Targets => commands::list_targets(),
        Command::Dump { file } => commands::dump_tree(&file),
    }
}

// ============================================================================
// Tests
// ============================================================================
