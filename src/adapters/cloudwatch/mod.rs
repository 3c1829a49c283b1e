//! CloudWatch Logs integration

pub mod client;

pub use client::CloudWatchLogsClient;
