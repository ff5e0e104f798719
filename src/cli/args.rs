//! CLI argument definitions using clap
//!
//! Commands:
//! - permis serve [--port <port>] [--in-memory]
//! - permis check

use clap::{Parser, Subcommand};

/// permis - REST service for driving-license records
#[derive(Parser, Debug)]
#[command(name = "permis")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Defaults to `serve`
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Listen port, overriding PORT
        #[arg(long)]
        port: Option<u16>,

        /// Keep records in process memory instead of PostgreSQL
        #[arg(long)]
        in_memory: bool,
    },

    /// Verify the database is reachable and exit
    Check,
}

impl Default for Command {
    fn default() -> Self {
        Command::Serve {
            port: None,
            in_memory: false,
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// The requested command, or `serve` when none is given
    pub fn command(self) -> Command {
        self.command.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_serves() {
        let cli = Cli::try_parse_from(["permis"]).unwrap();
        assert_eq!(cli.command(), Command::default());
    }

    #[test]
    fn test_serve_flags() {
        let cli = Cli::try_parse_from(["permis", "serve", "--port", "8081", "--in-memory"]).unwrap();
        assert_eq!(
            cli.command(),
            Command::Serve {
                port: Some(8081),
                in_memory: true
            }
        );
    }

    #[test]
    fn test_check() {
        let cli = Cli::try_parse_from(["permis", "check"]).unwrap();
        assert_eq!(cli.command(), Command::Check);
    }

    #[test]
    fn test_bad_port_rejected() {
        assert!(Cli::try_parse_from(["permis", "serve", "--port", "99999"]).is_err());
    }
}
