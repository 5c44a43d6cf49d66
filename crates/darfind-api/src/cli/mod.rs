//! CLI command definitions for the `darfind` binary.

pub mod session;

use clap::{Parser, Subcommand};

/// Real-estate lead intake chatbot.
#[derive(Parser)]
#[command(name = "darfind", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all log output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit log lines as JSON.
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server.
    Serve {
        /// Port to listen on (defaults to `server.port` in config.toml).
        #[arg(long, short, env = "DARFIND_PORT")]
        port: Option<u16>,

        /// Host to bind (defaults to `server.host` in config.toml).
        #[arg(long, env = "DARFIND_HOST")]
        host: Option<String>,
    },

    /// List stored chat sessions, newest first.
    #[command(alias = "ls")]
    Sessions {
        /// Maximum number of sessions to show.
        #[arg(long, short)]
        limit: Option<i64>,

        /// Number of sessions to skip.
        #[arg(long)]
        offset: Option<i64>,
    },

    /// Print the transcript of one session.
    History {
        /// Session identifier (the `session_id` cookie value).
        session_id: String,
    },
}

impl Cli {
    /// Default log filter when `RUST_LOG` is unset.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "warn",
            1 => "info,darfind=debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::try_parse_from(["darfind", "serve", "--port", "9000", "--host", "0.0.0.0"])
            .unwrap();
        match cli.command {
            Commands::Serve { port, host } => {
                assert_eq!(port, Some(9000));
                assert_eq!(host.as_deref(), Some("0.0.0.0"));
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_parse_history_with_global_flags() {
        let cli = Cli::try_parse_from(["darfind", "history", "abc", "--json", "-vv"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.log_filter(), "trace");
        assert!(matches!(cli.command, Commands::History { ref session_id } if session_id == "abc"));
    }

    #[test]
    fn test_log_filter_levels() {
        let quiet = Cli::try_parse_from(["darfind", "--quiet", "sessions"]).unwrap();
        assert_eq!(quiet.log_filter(), "error");
        let default = Cli::try_parse_from(["darfind", "sessions", "--limit", "5"]).unwrap();
        assert_eq!(default.log_filter(), "warn");
    }
}
