//! CLI module for Lectern.

pub mod commands;
pub mod html;
mod output;
pub mod preflight;

pub use output::Output;

use crate::config::Settings;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Lectern - a teaching agent team
///
/// Give it a topic and four personas (Professor, Academic Advisor, Research
/// Librarian, Teaching Assistant) write a knowledge base, a learning roadmap,
/// a curated resource list and practice materials as Google Docs.
#[derive(Parser, Debug)]
#[command(name = "lectern")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// The config file in effect: the `-c` path if given, else the default location.
    pub fn config_path(&self) -> PathBuf {
        match &self.config {
            Some(path) => Settings::expand_path(path),
            None => Settings::default_config_path(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the team on a topic and print the results
    Run {
        /// The topic you want to learn about (e.g. "Machine Learning", "LoRA")
        topic: String,

        /// OpenAI API key
        #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
        openai_api_key: Option<String>,

        /// Composio API key
        #[arg(long, env = "COMPOSIO_API_KEY", hide_env_values = true)]
        composio_api_key: Option<String>,

        /// Chat model to use for every persona
        #[arg(short, long)]
        model: Option<String>,

        /// Also write the report to a Markdown file
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Start the web front-end
    Serve {
        /// Host to bind to (defaults to server.host from the config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (defaults to server.port from the config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Describe the four personas and their tools
    Personas,

    /// Check API keys and configuration
    Doctor,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run() {
        let cli = Cli::try_parse_from([
            "lectern",
            "-vv",
            "run",
            "LoRA",
            "--openai-api-key",
            "sk-x",
            "--composio-api-key",
            "c-y",
            "-o",
            "out.md",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Run {
                topic,
                openai_api_key,
                output,
                ..
            } => {
                assert_eq!(topic, "LoRA");
                assert_eq!(openai_api_key.as_deref(), Some("sk-x"));
                assert_eq!(output.as_deref(), Some("out.md"));
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_parse_serve_defaults() {
        let cli = Cli::try_parse_from(["lectern", "serve"]).unwrap();
        match cli.command {
            Commands::Serve { host, port } => {
                assert!(host.is_none());
                assert!(port.is_none());
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_config_path_follows_flag() {
        let cli = Cli::try_parse_from(["lectern", "config", "path", "-c", "/tmp/team.toml"]).unwrap();
        assert_eq!(cli.config_path(), PathBuf::from("/tmp/team.toml"));

        let cli = Cli::try_parse_from(["lectern", "doctor"]).unwrap();
        assert_eq!(cli.config_path(), Settings::default_config_path());
    }
}
