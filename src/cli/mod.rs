//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for pii-curator using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// pii-curator - LLM-backed PII redaction for text datasets
#[derive(Parser, Debug)]
#[command(name = "pii-curator")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(
        short,
        long,
        default_value = "pii-curator.toml",
        env = "PII_CURATOR_CONFIG"
    )]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "PII_CURATOR_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Redact PII from a JSONL dataset
    Redact(commands::redact::RedactArgs),

    /// Apply a document filter to a JSONL dataset
    Filter(commands::filter::FilterArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_redact() {
        let cli = Cli::parse_from([
            "pii-curator",
            "redact",
            "--input",
            "in.jsonl",
            "--output",
            "out.jsonl",
        ]);
        assert_eq!(cli.config, "pii-curator.toml");
        match cli.command {
            Commands::Redact(args) => {
                assert_eq!(args.text_field, "text");
                assert_eq!(args.batch_size.get(), 64);
                assert!(!args.dry_run);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_with_config_and_log_level() {
        let cli = Cli::parse_from([
            "pii-curator",
            "--config",
            "custom.toml",
            "--log-level",
            "debug",
            "validate-config",
        ]);
        assert_eq!(cli.config, "custom.toml");
        assert_eq!(cli.log_level, Some("debug".to_string()));
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_filter_params() {
        let cli = Cli::parse_from([
            "pii-curator",
            "filter",
            "--input",
            "in.jsonl",
            "--output",
            "out.jsonl",
            "--filter",
            "word_count",
            "--param",
            "min_words=3",
            "--param",
            "max_words=10",
        ]);
        match cli.command {
            Commands::Filter(args) => {
                assert_eq!(args.filter, "word_count");
                assert_eq!(args.params.len(), 2);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["pii-curator", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }

    #[test]
    fn test_cli_rejects_zero_batch_size() {
        let result = Cli::try_parse_from([
            "pii-curator",
            "redact",
            "--input",
            "a",
            "--output",
            "b",
            "--batch-size",
            "0",
        ]);
        assert!(result.is_err());
    }
}
