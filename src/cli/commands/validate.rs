//! Validate config command implementation

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates internally
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Dry Run: {}", config.application.dry_run);
        println!("  Destination Bucket: {}", config.destination.bucket);
        if !config.destination.prefix.is_empty() {
            println!("  Destination Prefix: {}", config.destination.prefix);
        }
        println!("  Log Groups ({}):", config.export.log_groups.len());
        for group in &config.export.log_groups {
            println!("    - {group}");
        }
        println!("  Window Mode: {:?}", config.window.mode);
        println!("  Lookback Hours: {}", config.window.lookback_hours);
        println!("  Age Offset Days: {}", config.window.age_offset_days);
        println!(
            "  Wait For Completion: {}",
            config.export.wait_for_completion
        );
        println!();
        Ok(0)
    }
}
