//! CLI module for permis
//!
//! Provides command-line interface for:
//! - serve: Start the HTTP API (default)
//! - check: Verify database connectivity

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{check, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};
