//! permis CLI entry point
//!
//! Parses arguments, dispatches via `cli::run`, prints errors to stderr,
//! and exits non-zero on failure.

use permis_service::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
