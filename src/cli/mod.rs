//! CLI interface and argument parsing
//!
//! This module provides the command-line interface using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// CloudWatch Logs to S3 export dispatcher
#[derive(Parser, Debug)]
#[command(name = "logship")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "logship.toml", env = "LOGSHIP_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "LOGSHIP_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one export dispatch for the configured log groups
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Show recent provider-side export tasks
    Status(commands::status::StatusArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_export() {
        let cli = Cli::parse_from(["logship", "export"]);
        assert_eq!(cli.config, "logship.toml");
        assert!(matches!(cli.command, Commands::Export(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["logship", "--config", "custom.toml", "export"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["logship", "--log-level", "debug", "export"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_export_flags() {
        let cli = Cli::parse_from([
            "logship",
            "export",
            "--dry-run",
            "--log-group",
            "/app/api,/app/worker",
            "--budget-secs",
            "120",
        ]);
        match cli.command {
            Commands::Export(args) => {
                assert!(args.dry_run);
                assert_eq!(args.log_group.as_deref(), Some("/app/api,/app/worker"));
                assert_eq!(args.budget_secs, Some(120));
            }
            _ => panic!("expected export command"),
        }
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["logship", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_status() {
        let cli = Cli::parse_from(["logship", "status", "--limit", "5"]);
        match cli.command {
            Commands::Status(args) => assert_eq!(args.limit, 5),
            _ => panic!("expected status command"),
        }
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["logship", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}
