//! Export command implementation
//!
//! Runs one dispatch pass on demand, with the same semantics as a
//! scheduled invocation.

use crate::adapters::cloudwatch::CloudWatchLogsClient;
use crate::adapters::s3::S3BucketProbe;
use crate::config::load_config;
use crate::core::dispatch::summary::EntryDisposition;
use crate::core::dispatch::{Budget, Dispatcher};
use crate::domain::errors::ExporterError;
use clap::Args;
use std::sync::Arc;
use std::time::Duration;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Dry run mode - build and log requests without submitting
    #[arg(long)]
    pub dry_run: bool,

    /// Override log group(s) to export (comma-separated, in order)
    #[arg(long)]
    pub log_group: Option<String>,

    /// Override lookback window duration in hours
    #[arg(long)]
    pub lookback_hours: Option<u64>,

    /// Time budget for this invocation in seconds (default: none)
    #[arg(long)]
    pub budget_secs: Option<u64>,

    /// Wait for each submitted task to complete before the next group
    #[arg(long)]
    pub wait: bool,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        let mut config = load_config(config_path)?;

        // Apply CLI overrides
        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }

        if let Some(groups) = &self.log_group {
            let names: Vec<String> = groups.split(',').map(|s| s.trim().to_string()).collect();
            tracing::info!(log_groups = ?names, "Overriding log groups from CLI");
            config.export.log_groups = names;
        }

        if let Some(hours) = self.lookback_hours {
            tracing::info!(lookback_hours = hours, "Overriding lookback window from CLI");
            config.window.lookback_hours = hours;
        }

        if self.wait {
            config.export.wait_for_completion = true;
        }

        // Re-validate after overrides
        if let Err(e) = config.validate() {
            eprintln!("Invalid configuration after CLI overrides: {e}");
            return Ok(2);
        }

        let budget = match self.budget_secs {
            Some(secs) => Budget::from_remaining(
                Duration::from_secs(secs),
                Duration::from_secs(config.export.budget_reserve_secs),
            ),
            None => Budget::unbounded(),
        };

        let shared_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let dispatcher = Dispatcher::new(
            config,
            Arc::new(CloudWatchLogsClient::new(&shared_config)),
            Arc::new(S3BucketProbe::new(&shared_config)),
        );

        let summary = match dispatcher.dispatch(budget).await {
            Ok(s) => s,
            Err(ExporterError::Storage(e)) => {
                eprintln!("❌ Destination bucket check failed: {e}");
                return Ok(4);
            }
            Err(e) => {
                eprintln!("❌ Dispatch failed: {e}");
                return Ok(5);
            }
        };

        println!(
            "Export window: {} → {}",
            summary.window_from, summary.window_to
        );
        for outcome in &summary.outcomes {
            let line = match &outcome.disposition {
                EntryDisposition::Submitted { task_id } => {
                    format!("✅ submitted (task {task_id})")
                }
                EntryDisposition::SubmittedDryRun => "✅ dry-run, not submitted".to_string(),
                EntryDisposition::AlreadyPending => {
                    "⏳ skipped: another export task is pending".to_string()
                }
                EntryDisposition::MissingGroup => "❌ log group not found".to_string(),
                EntryDisposition::Failed { reason } => format!("❌ failed: {reason}"),
                EntryDisposition::NotAttempted => "⏭ not attempted (budget expired)".to_string(),
            };
            println!("  {}  {}", outcome.log_group, line);
        }
        println!(
            "{} of {} groups submitted in {} ms",
            summary.submitted(),
            summary.outcomes.len(),
            summary.duration_ms
        );

        Ok(if summary.is_clean() { 0 } else { 1 })
    }
}
