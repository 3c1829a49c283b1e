//! Configuration schema types
//!
//! This module defines the configuration structure for the exporter.

use serde::{Deserialize, Serialize};
use std::env;

/// Export window policy selection
///
/// See [`crate::core::dispatch::window::ExportWindow`] for the window math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum WindowMode {
    /// Fixed window ending at invocation time
    #[default]
    Lookback,
    /// 24-hour slice that is `age_offset_days` old (archival policy)
    AgeOffset,
}

/// Main exporter configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExporterConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Destination bucket settings
    pub destination: DestinationConfig,

    /// Export dispatch settings
    pub export: ExportConfig,

    /// Export window settings
    #[serde(default)]
    pub window: WindowConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ExporterConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.destination.validate()?;
        self.export.validate()?;
        self.window.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Builds a configuration from environment variables only
    ///
    /// This is the configuration path for the Lambda entry point, where
    /// there is no configuration file. Required variables:
    ///
    /// - `LOGSHIP_BUCKET` - destination bucket name
    /// - `LOGSHIP_LOG_GROUPS` - comma-separated log group names, in
    ///   dispatch order
    ///
    /// Optional variables override the corresponding defaults:
    /// `LOGSHIP_PREFIX`, `LOGSHIP_LOG_LEVEL`, `LOGSHIP_DRY_RUN`,
    /// `LOGSHIP_TASK_NAME_PREFIX`, `LOGSHIP_WAIT_FOR_COMPLETION`,
    /// `LOGSHIP_COMPLETION_TIMEOUT_SECS`, `LOGSHIP_BUDGET_RESERVE_SECS`,
    /// `LOGSHIP_WINDOW_MODE` (`lookback` or `age-offset`),
    /// `LOGSHIP_LOOKBACK_HOURS`, `LOGSHIP_AGE_OFFSET_DAYS`.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value fails
    /// to parse, or if the resulting configuration is invalid.
    pub fn from_env() -> Result<Self, String> {
        let bucket = env::var("LOGSHIP_BUCKET")
            .map_err(|_| "LOGSHIP_BUCKET environment variable is not set".to_string())?;
        let log_groups = env::var("LOGSHIP_LOG_GROUPS")
            .map_err(|_| "LOGSHIP_LOG_GROUPS environment variable is not set".to_string())?
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let config = Self {
            application: ApplicationConfig {
                log_level: env_or("LOGSHIP_LOG_LEVEL", default_log_level()),
                dry_run: parse_env_opt("LOGSHIP_DRY_RUN")?.unwrap_or(false),
            },
            destination: DestinationConfig {
                bucket,
                prefix: env_or("LOGSHIP_PREFIX", String::new()),
            },
            export: ExportConfig {
                log_groups,
                task_name_prefix: env_or("LOGSHIP_TASK_NAME_PREFIX", default_task_name_prefix()),
                wait_for_completion: parse_env_opt("LOGSHIP_WAIT_FOR_COMPLETION")?.unwrap_or(false),
                completion_timeout_secs: parse_env_opt("LOGSHIP_COMPLETION_TIMEOUT_SECS")?
                    .unwrap_or_else(default_completion_timeout_secs),
                budget_reserve_secs: parse_env_opt("LOGSHIP_BUDGET_RESERVE_SECS")?
                    .unwrap_or_else(default_budget_reserve_secs),
            },
            window: WindowConfig {
                mode: match env::var("LOGSHIP_WINDOW_MODE").ok().as_deref() {
                    None => WindowMode::default(),
                    Some("lookback") => WindowMode::Lookback,
                    Some("age-offset") => WindowMode::AgeOffset,
                    Some(other) => {
                        return Err(format!(
                            "Invalid LOGSHIP_WINDOW_MODE '{other}'. Must be 'lookback' or 'age-offset'"
                        ))
                    }
                },
                lookback_hours: parse_env_opt("LOGSHIP_LOOKBACK_HOURS")?
                    .unwrap_or_else(default_lookback_hours),
                age_offset_days: parse_env_opt("LOGSHIP_AGE_OFFSET_DAYS")?
                    .unwrap_or_else(default_age_offset_days),
            },
            logging: LoggingConfig::default(),
        };

        config.validate()?;
        Ok(config)
    }
}

fn env_or(name: &str, default: String) -> String {
    env::var(name).unwrap_or(default)
}

fn parse_env_opt<T: std::str::FromStr>(name: &str) -> Result<Option<T>, String> {
    match env::var(name) {
        Ok(value) => value
            .parse::<T>()
            .map(Some)
            .map_err(|_| format!("Invalid value for {name}: '{value}'")),
        Err(_) => Ok(None),
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Dry run mode (build requests but submit nothing)
    #[serde(default)]
    pub dry_run: bool,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dry_run: false,
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Destination bucket configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestinationConfig {
    /// S3 bucket name (must be in the same region as the log groups)
    pub bucket: String,

    /// Root key prefix inside the bucket; per-group date-partitioned
    /// prefixes are appended underneath
    #[serde(default)]
    pub prefix: String,
}

impl DestinationConfig {
    fn validate(&self) -> Result<(), String> {
        if self.bucket.trim().is_empty() {
            return Err("destination.bucket cannot be empty".to_string());
        }
        if self.prefix.starts_with('/') {
            return Err("destination.prefix must not start with '/'".to_string());
        }
        Ok(())
    }
}

/// Export dispatch configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Ordered list of log group names to export, processed sequentially
    pub log_groups: Vec<String>,

    /// Prefix for provider-visible task names; a uuid is appended per
    /// submission
    #[serde(default = "default_task_name_prefix")]
    pub task_name_prefix: String,

    /// Poll each submitted task to completion before moving to the next
    /// group. With the provider's one-pending-task limit this is the only
    /// way more than one group can be exported per invocation.
    #[serde(default)]
    pub wait_for_completion: bool,

    /// Upper bound in seconds on waiting for a single task to complete
    #[serde(default = "default_completion_timeout_secs")]
    pub completion_timeout_secs: u64,

    /// Seconds reserved at the end of the invocation budget; no new
    /// submission is attempted once the remaining budget drops below this
    #[serde(default = "default_budget_reserve_secs")]
    pub budget_reserve_secs: u64,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.log_groups.is_empty() {
            return Err("export.log_groups cannot be empty".to_string());
        }
        for name in &self.log_groups {
            crate::domain::LogGroupName::new(name.clone())
                .map_err(|e| format!("export.log_groups: {e}"))?;
        }
        if self.task_name_prefix.trim().is_empty() {
            return Err("export.task_name_prefix cannot be empty".to_string());
        }
        if self.wait_for_completion && self.completion_timeout_secs == 0 {
            return Err(
                "export.completion_timeout_secs must be positive when wait_for_completion is set"
                    .to_string(),
            );
        }
        Ok(())
    }
}

/// Export window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window policy
    #[serde(default)]
    pub mode: WindowMode,

    /// Lookback duration in hours (lookback mode)
    #[serde(default = "default_lookback_hours")]
    pub lookback_hours: u64,

    /// Age of the exported 24-hour slice in days (age-offset mode)
    #[serde(default = "default_age_offset_days")]
    pub age_offset_days: u64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            mode: WindowMode::default(),
            lookback_hours: default_lookback_hours(),
            age_offset_days: default_age_offset_days(),
        }
    }
}

impl WindowConfig {
    fn validate(&self) -> Result<(), String> {
        match self.mode {
            WindowMode::Lookback if self.lookback_hours == 0 => {
                Err("window.lookback_hours must be positive".to_string())
            }
            WindowMode::AgeOffset if self.age_offset_days == 0 => {
                Err("window.age_offset_days must be positive".to_string())
            }
            _ => Ok(()),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable logging to rotating local files in addition to the console
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for local log files
    #[serde(default = "default_log_path")]
    pub local_path: String,

    /// Rotation policy: "daily" or "hourly"
    #[serde(default = "default_log_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_log_path(),
            local_rotation: default_log_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.local_enabled {
            if self.local_path.trim().is_empty() {
                return Err("logging.local_path cannot be empty".to_string());
            }
            if !matches!(self.local_rotation.as_str(), "daily" | "hourly") {
                return Err(format!(
                    "Invalid logging.local_rotation '{}'. Must be 'daily' or 'hourly'",
                    self.local_rotation
                ));
            }
        }
        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_task_name_prefix() -> String {
    "logship".to_string()
}

fn default_completion_timeout_secs() -> u64 {
    300
}

fn default_budget_reserve_secs() -> u64 {
    10
}

fn default_lookback_hours() -> u64 {
    24
}

fn default_age_offset_days() -> u64 {
    90
}

fn default_log_path() -> String {
    "logs".to_string()
}

fn default_log_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> ExporterConfig {
        ExporterConfig {
            application: ApplicationConfig::default(),
            destination: DestinationConfig {
                bucket: "cw-log-exports".to_string(),
                prefix: "exports".to_string(),
            },
            export: ExportConfig {
                log_groups: vec!["/app/api".to_string(), "/app/worker".to_string()],
                task_name_prefix: "logship".to_string(),
                wait_for_completion: false,
                completion_timeout_secs: 300,
                budget_reserve_secs: 10,
            },
            window: WindowConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    #[test]
    fn test_valid_config_passes_validation() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_empty_bucket_fails_validation() {
        let mut config = valid_config();
        config.destination.bucket = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_leading_slash_prefix_fails_validation() {
        let mut config = valid_config();
        config.destination.prefix = "/exports".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_log_groups_fails_validation() {
        let mut config = valid_config();
        config.export.log_groups.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_log_group_name_fails_validation() {
        let mut config = valid_config();
        config.export.log_groups.push("bad name".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_log_level_fails_validation() {
        let mut config = valid_config();
        config.application.log_level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_lookback_fails_validation() {
        let mut config = valid_config();
        config.window.lookback_hours = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_age_offset_ok_in_lookback_mode() {
        let mut config = valid_config();
        config.window.age_offset_days = 0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_wait_without_timeout_fails_validation() {
        let mut config = valid_config();
        config.export.wait_for_completion = true;
        config.export.completion_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_window_mode_kebab_case_deserialization() {
        let config: WindowConfig = toml::from_str("mode = \"age-offset\"").unwrap();
        assert_eq!(config.mode, WindowMode::AgeOffset);
        assert_eq!(config.lookback_hours, 24);
        assert_eq!(config.age_offset_days, 90);
    }
}
