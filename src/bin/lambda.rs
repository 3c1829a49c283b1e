// Logship - CloudWatch Logs to S3 Export Dispatcher
// Copyright (c) 2026 Logship Contributors
// Licensed under the MIT License

//! Scheduled Lambda entry point.
//!
//! Configured entirely through `LOGSHIP_*` environment variables and
//! triggered by an EventBridge schedule. The invocation's remaining-time
//! budget is taken from the Lambda context; groups not reached before the
//! budget expires are picked up by the next scheduled run.

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use logship::adapters::cloudwatch::CloudWatchLogsClient;
use logship::adapters::s3::S3BucketProbe;
use logship::config::ExporterConfig;
use logship::core::dispatch::{Budget, Dispatcher};
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    // CloudWatch captures stdout; emit JSON lines without ANSI noise.
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .without_time()
        .init();

    let config = ExporterConfig::from_env().map_err(Error::from)?;
    let reserve = Duration::from_secs(config.export.budget_reserve_secs);

    let shared_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let dispatcher = Dispatcher::new(
        config,
        Arc::new(CloudWatchLogsClient::new(&shared_config)),
        Arc::new(S3BucketProbe::new(&shared_config)),
    );

    run(service_fn(|event| handler(event, &dispatcher, reserve))).await
}

async fn handler(
    event: LambdaEvent<Value>,
    dispatcher: &Dispatcher,
    reserve: Duration,
) -> Result<Value, Error> {
    let budget = match remaining_time(event.context.deadline) {
        Some(remaining) => Budget::from_remaining(remaining, reserve),
        None => Budget::unbounded(),
    };

    // Per-entry failures are in the summary; only fatal conditions
    // (bucket probe, credentials) fail the invocation.
    let summary = dispatcher.dispatch(budget).await?;
    Ok(serde_json::to_value(&summary)?)
}

/// Remaining invocation time from the context deadline (epoch millis)
fn remaining_time(deadline_ms: u64) -> Option<Duration> {
    if deadline_ms == 0 {
        return None;
    }
    let now_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()?
        .as_millis() as u64;
    Some(Duration::from_millis(deadline_ms.saturating_sub(now_ms)))
}
