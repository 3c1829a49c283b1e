//! External system integrations.
//!
//! - [`traits`] - The adapter seam ([`LogsClient`](traits::LogsClient),
//!   [`BucketProbe`](traits::BucketProbe)) the dispatcher depends on
//! - [`cloudwatch`] - CloudWatch Logs implementation (export task
//!   submission and status)
//! - [`s3`] - S3 implementation of the destination bucket probe
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate the AWS SDKs and
//! enable testing with mock implementations. Provider error codes are
//! mapped into the domain error taxonomy at this layer; nothing above it
//! sees SDK types.
//!
//! ```rust,no_run
//! use logship::adapters::cloudwatch::CloudWatchLogsClient;
//! use logship::adapters::s3::S3BucketProbe;
//!
//! # async fn example() {
//! let shared_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
//! let logs = CloudWatchLogsClient::new(&shared_config);
//! let probe = S3BucketProbe::new(&shared_config);
//! # }
//! ```

pub mod cloudwatch;
pub mod s3;
pub mod traits;

pub use traits::{BucketProbe, ExportTaskInfo, ExportTaskState, LogsClient};
