//! CLI command definitions for the `bschool` binary.
//!
//! Uses clap derive macros for argument parsing. Global flags pick the
//! config file, API key, and model; subcommands choose the front end.

pub mod render;
pub mod wizard;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Turn a raw startup idea into a plan, a score, and a prototype.
#[derive(Parser)]
#[command(name = "bschool", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export spans to stdout through OpenTelemetry.
    #[arg(long, global = true)]
    pub otel: bool,

    /// Path to config.toml (default: platform config dir).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// API key for the model endpoint. Falls back to the variable named by
    /// `api_key_env` in the config (GROQ_API_KEY by default).
    #[arg(long, global = true, env = "BSCHOOL_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Chat model to use instead of the configured one.
    #[arg(long, global = true)]
    pub model: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the web wizard and JSON API.
    Serve {
        /// Address to bind (default from config: 127.0.0.1).
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (default from config: 8501).
        #[arg(long, short)]
        port: Option<u16>,
    },

    /// Run the wizard interactively in the terminal.
    Wizard,

    /// Print the resolved configuration.
    Config,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_flags_parse() {
        let cli = Cli::try_parse_from([
            "bschool", "--model", "llama-3.1-8b-instant", "serve", "--port", "9000",
        ])
        .unwrap();
        assert_eq!(cli.model.as_deref(), Some("llama-3.1-8b-instant"));
        match cli.command {
            Commands::Serve { host, port } => {
                assert_eq!(host, None);
                assert_eq!(port, Some(9000));
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn verbosity_counts() {
        let cli = Cli::try_parse_from(["bschool", "-vv", "wizard"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Wizard));
    }
}
