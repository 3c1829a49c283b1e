//! Configuration management.
//!
//! TOML-based configuration loading, parsing, and validation, plus an
//! environment-only path for the Lambda entry point.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use logship::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("logship.toml")?;
//! println!("Destination bucket: {}", config.destination.bucket);
//! println!("Log groups: {:?}", config.export.log_groups);
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [destination]
//! bucket = "cw-log-exports"
//! prefix = "exports"
//!
//! [export]
//! log_groups = ["/app/api", "/app/worker"]
//! wait_for_completion = true
//!
//! [window]
//! mode = "lookback"
//! lookback_hours = 24
//! ```
//!
//! # Environment Variables
//!
//! Use `${VAR_NAME}` syntax in the TOML file for substitution, or
//! `LOGSHIP_*` variables to override individual settings. The Lambda
//! binary is configured entirely through `LOGSHIP_*` variables via
//! [`ExporterConfig::from_env`].

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, DestinationConfig, ExportConfig, ExporterConfig, LoggingConfig,
    WindowConfig, WindowMode,
};
