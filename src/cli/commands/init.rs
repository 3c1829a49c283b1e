//! Init command implementation
//!
//! Generates a sample configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "logship.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        match fs::write(&self.output, Self::sample_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your bucket and log groups", self.output);
                println!("  2. Attach the bucket policy from the README to the bucket");
                println!("  3. Run 'logship validate-config' to check the result");
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file: {e}");
                Ok(5)
            }
        }
    }

    fn sample_config() -> &'static str {
        r#"# logship configuration
#
# The destination bucket must be in the same region as the log groups and
# must grant the CloudWatch Logs service principal GetBucketAcl and
# PutObject (see README for the bucket policy).

[application]
log_level = "info"
dry_run = false

[destination]
bucket = "cw-log-exports"
# Root key prefix; per-group date-partitioned prefixes are appended.
prefix = "exports"

[export]
# Log groups to export, processed in this order. The provider allows only
# one pending export task at a time; without wait_for_completion, at most
# one submission per invocation usually succeeds.
log_groups = [
    "/app/api",
    "/app/worker",
]
task_name_prefix = "logship"
wait_for_completion = true
completion_timeout_secs = 300
budget_reserve_secs = 10

[window]
# "lookback": export [now - lookback_hours, now]
# "age-offset": export the 24h slice that is age_offset_days old
mode = "lookback"
lookback_hours = 24
age_offset_days = 90

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"
"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_config_parses_and_validates() {
        let config: crate::config::ExporterConfig =
            toml::from_str(InitArgs::sample_config()).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.destination.bucket, "cw-log-exports");
        assert_eq!(config.export.log_groups.len(), 2);
    }
}
