//! CLI module for opgen
//!
//! This module provides the command-line interface for the generator.
//!
//! ## Commands
//!
//! - `gen <ACTION> <FILE>` - Run one registered generator over a JSON schema file
//! - `generators` - List registered generators
//! - `check <FILE>` - Load a schema and run every generator in memory
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

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use crate::backend::{EmitConfig, GenRegistry};

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

    /// Render a diagnostic (code, labels, help) into a failure error.
    pub fn diagnostic<D>(diagnostic: D) -> Self
    where
        D: miette::Diagnostic + Send + Sync + 'static,
    {
        Self::failure(format!("{:?}", miette::Report::new(diagnostic)))
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

/// Operation definition generator
#[derive(Parser, Debug)]
#[command(name = "opgen")]
#[command(version = VERSION)]
#[command(about = "Generate C++ op class declarations and definitions from an op schema", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a generator over a schema file
    Gen {
        /// Generator name (see `opgen generators`)
        #[arg(value_name = "ACTION")]
        action: String,
        /// JSON schema file
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Output file (default: stdout)
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,
        /// Do not emit the op list in definitions mode
        #[arg(long)]
        no_op_list: bool,
        /// Do not emit the generated-file banner
        #[arg(long)]
        no_header: bool,
    },

    /// List registered generators
    Generators,

    /// Load a schema and run every generator without writing output
    Check {
        /// JSON schema file
        #[arg(value_name = "FILE")]
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
fn execute(cli: Cli) -> CliResult<ExitCode> {
    let registry = GenRegistry::builtin();

    match cli.command {
        Command::Gen {
            action,
            file,
            output,
            no_op_list,
            no_header,
        } => {
            let config = EmitConfig::new()
                .with_op_list(!no_op_list)
                .with_file_header(!no_header);
            commands::generate(&registry, &action, &file, output.as_deref(), &config)
        }
        Command::Generators => commands::list_generators(&registry),
        Command::Check { file } => commands::check(&registry, &file),
    }
}

// ============================================================================
// Tests
// ============================================================================
