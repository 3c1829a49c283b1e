// Logship - CloudWatch Logs to S3 Export Dispatcher
// Copyright (c) 2026 Logship Contributors
// Licensed under the MIT License

//! # Logship - CloudWatch Logs to S3 Export Dispatcher
//!
//! Logship submits CloudWatch Logs export tasks to an S3 bucket for a
//! configured, ordered list of log groups. It runs either on a schedule as
//! an AWS Lambda function or on demand as a CLI.
//!
//! ## Overview
//!
//! On each invocation the dispatcher:
//! - **Probes** the destination bucket (fatal if missing or unreadable)
//! - **Computes** a bounded export window for this run
//! - **Submits** one export task per configured log group, in order
//! - **Reports** a per-entry outcome summary
//!
//! The provider allows a single pending export task per account. Logship
//! treats that as an external invariant: a rejected submission is recorded
//! and skipped, never retried within the invocation. Optionally each
//! submitted task is polled to completion so the next group's submission
//! can succeed.
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Dispatch orchestration (window, budget, summary)
//! - [`adapters`] - External integrations (CloudWatch Logs, S3)
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use logship::adapters::cloudwatch::CloudWatchLogsClient;
//! use logship::adapters::s3::S3BucketProbe;
//! use logship::config::load_config;
//! use logship::core::dispatch::{Budget, Dispatcher};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("logship.toml")?;
//!     let aws = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
//!
//!     let dispatcher = Dispatcher::new(
//!         config,
//!         Arc::new(CloudWatchLogsClient::new(&aws)),
//!         Arc::new(S3BucketProbe::new(&aws)),
//!     );
//!
//!     let summary = dispatcher.dispatch(Budget::unbounded()).await?;
//!     println!("Submitted {} export task(s)", summary.submitted());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Per-entry conditions (a pending task, a missing log group) are recorded
//! in the [`core::dispatch::DispatchSummary`] and the loop continues.
//! Invocation-fatal conditions (bucket probe failure, credential failure)
//! surface as [`domain::ExporterError`].
//!
//! ## Logging
//!
//! Structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!(log_group = "/app/api", "Export task submitted");
//! warn!(log_group = "/app/api", "Export task already pending, skipping");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
