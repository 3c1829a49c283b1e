//! Core business logic.
//!
//! # Dispatch Workflow
//!
//! One scheduled invocation:
//!
//! 1. **Probe**: verify the destination bucket exists and is reachable
//! 2. **Window**: compute the export time range for this invocation
//! 3. **Dispatch**: for each configured log group, in order, submit one
//!    export task; skip and record per-entry failures
//! 4. **Report**: return a [`dispatch::DispatchSummary`]
//!
//! # Example
//!
//! ```rust,no_run
//! use logship::config::load_config;
//! use logship::core::dispatch::{Budget, Dispatcher};
//! use logship::adapters::cloudwatch::CloudWatchLogsClient;
//! use logship::adapters::s3::S3BucketProbe;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("logship.toml")?;
//! let shared_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
//! let dispatcher = Dispatcher::new(
//!     config,
//!     Arc::new(CloudWatchLogsClient::new(&shared_config)),
//!     Arc::new(S3BucketProbe::new(&shared_config)),
//! );
//!
//! let summary = dispatcher.dispatch(Budget::unbounded()).await?;
//! println!("Submitted: {}", summary.submitted());
//! # Ok(())
//! # }
//! ```

pub mod dispatch;
