//! Export dispatcher - orchestrates one scheduled invocation
//!
//! On each invocation the dispatcher verifies the destination bucket,
//! computes the export window, then walks the configured log groups in
//! order, submitting one export task per group. Per-entry conditions (a
//! task already pending, a missing log group) are recorded and skipped;
//! a bucket or credential failure aborts the invocation. When the
//! invocation budget runs out, remaining groups are left for the next
//! scheduled run.

use crate::adapters::traits::{BucketProbe, ExportTaskState, LogsClient};
use crate::config::ExporterConfig;
use crate::core::dispatch::summary::{DispatchSummary, EntryDisposition};
use crate::core::dispatch::window::{destination_prefix, ExportWindow};
use crate::domain::errors::{ExporterError, LogsError};
use crate::domain::ids::{LogGroupName, TaskId};
use crate::domain::request::ExportRequest;
use crate::domain::Result;
use chrono::Utc;
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Invocation time budget
///
/// Wraps the deadline handed to the entry point (the Lambda context's
/// remaining time, or a CLI flag). A reserve is held back so an in-flight
/// submission can finish and the summary can be returned before the
/// platform kills the invocation.
#[derive(Debug, Clone, Copy)]
pub struct Budget {
    deadline: Option<Instant>,
    reserve: Duration,
}

impl Budget {
    /// A budget with no deadline (CLI default)
    pub fn unbounded() -> Self {
        Self {
            deadline: None,
            reserve: Duration::ZERO,
        }
    }

    /// A budget expiring `remaining` from now, holding back `reserve`
    pub fn from_remaining(remaining: Duration, reserve: Duration) -> Self {
        Self {
            deadline: Some(Instant::now() + remaining),
            reserve,
        }
    }

    /// A budget with an absolute deadline, holding back `reserve`
    pub fn with_deadline(deadline: Instant, reserve: Duration) -> Self {
        Self {
            deadline: Some(deadline),
            reserve,
        }
    }

    /// Time left before the reserve is cut into, if a deadline is set
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|d| d.saturating_duration_since(Instant::now()).saturating_sub(self.reserve))
    }

    /// Whether no usable time is left
    pub fn exhausted(&self) -> bool {
        matches!(self.remaining(), Some(d) if d.is_zero())
    }
}

/// Export dispatcher
pub struct Dispatcher {
    config: ExporterConfig,
    logs: Arc<dyn LogsClient>,
    probe: Arc<dyn BucketProbe>,
}

impl Dispatcher {
    /// Creates a dispatcher over the given adapters
    pub fn new(
        config: ExporterConfig,
        logs: Arc<dyn LogsClient>,
        probe: Arc<dyn BucketProbe>,
    ) -> Self {
        Self {
            config,
            logs,
            probe,
        }
    }

    /// Runs one dispatch invocation
    ///
    /// # Errors
    ///
    /// Returns an error only for invocation-fatal conditions: the
    /// destination bucket probe failing, or a credential failure from the
    /// logging service. Per-entry failures are recorded in the returned
    /// [`DispatchSummary`].
    pub async fn dispatch(&self, budget: Budget) -> Result<DispatchSummary> {
        let start = Instant::now();
        let bucket = &self.config.destination.bucket;

        tracing::info!(
            bucket = %bucket,
            log_groups = self.config.export.log_groups.len(),
            dry_run = self.config.application.dry_run,
            "Starting export dispatch"
        );

        // Bucket first: if this fails nothing else can succeed.
        self.probe.verify_bucket(bucket).await.map_err(|e| {
            tracing::error!(bucket = %bucket, error = %e, "Destination bucket probe failed");
            ExporterError::from(e)
        })?;

        let window = ExportWindow::from_config(Utc::now(), &self.config.window);
        let mut summary = DispatchSummary::new(&window);

        tracing::info!(
            from = %window.from(),
            to = %window.to(),
            "Export window computed"
        );

        for name in &self.config.export.log_groups {
            if budget.exhausted() {
                tracing::warn!(
                    log_group = %name,
                    "Invocation budget exhausted, leaving remaining groups for the next run"
                );
                summary.record(name.clone(), EntryDisposition::NotAttempted);
                continue;
            }

            let log_group = match LogGroupName::new(name.clone()) {
                Ok(g) => g,
                Err(e) => {
                    // Config validation screens names up front; this only
                    // trips when the dispatcher is driven programmatically.
                    summary.record(name.clone(), EntryDisposition::Failed { reason: e });
                    continue;
                }
            };

            let disposition = self.submit_entry(&log_group, &window, &budget).await?;
            summary.record(name.clone(), disposition);
        }

        let summary = summary.with_duration(start.elapsed());
        tracing::info!(
            submitted = summary.submitted(),
            already_pending = summary.already_pending(),
            missing_groups = summary.missing_groups(),
            failed = summary.failed(),
            not_attempted = summary.not_attempted(),
            duration_ms = summary.duration_ms,
            "Export dispatch finished"
        );
        Ok(summary)
    }

    /// Submits one export task and classifies the result
    async fn submit_entry(
        &self,
        log_group: &LogGroupName,
        window: &ExportWindow,
        budget: &Budget,
    ) -> Result<EntryDisposition> {
        let prefix = destination_prefix(&self.config.destination.prefix, log_group, window);
        let task_name = format!(
            "{}-{}",
            self.config.export.task_name_prefix,
            Uuid::new_v4()
        );

        let request = match ExportRequest::new(
            task_name,
            log_group.clone(),
            &self.config.destination.bucket,
            &prefix,
            window.from(),
            window.to(),
        ) {
            Ok(r) => r,
            Err(e) => return Ok(EntryDisposition::Failed { reason: e }),
        };

        if self.config.application.dry_run {
            tracing::info!(
                log_group = %log_group,
                destination_prefix = %prefix,
                "Dry run: export task not submitted"
            );
            return Ok(EntryDisposition::SubmittedDryRun);
        }

        match self.logs.create_export_task(&request).await {
            Ok(task_id) => {
                tracing::info!(
                    log_group = %log_group,
                    task_id = %task_id,
                    destination_prefix = %prefix,
                    "Export task submitted"
                );
                if self.config.export.wait_for_completion {
                    self.await_completion(&task_id, budget).await;
                }
                Ok(EntryDisposition::Submitted {
                    task_id: task_id.into_inner(),
                })
            }
            Err(LogsError::TaskAlreadyPending(msg)) => {
                tracing::warn!(
                    log_group = %log_group,
                    detail = %msg,
                    "Export task already pending, skipping group this invocation"
                );
                Ok(EntryDisposition::AlreadyPending)
            }
            Err(LogsError::LogGroupNotFound(msg)) => {
                tracing::warn!(
                    log_group = %log_group,
                    detail = %msg,
                    "Log group not found, skipping"
                );
                Ok(EntryDisposition::MissingGroup)
            }
            Err(e) if e.is_fatal() => {
                tracing::error!(log_group = %log_group, error = %e, "Fatal error during dispatch");
                Err(e.into())
            }
            Err(e) => {
                tracing::warn!(log_group = %log_group, error = %e, "Export submission failed");
                Ok(EntryDisposition::Failed {
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Polls a submitted task until it reaches a terminal state
    ///
    /// Bounded by `completion_timeout_secs` and the invocation budget.
    /// With only one export task allowed in flight account-wide, waiting
    /// here is what lets the next group's submission succeed. Poll
    /// failures and timeouts are logged, never escalated: the task keeps
    /// running provider-side either way.
    async fn await_completion(&self, task_id: &TaskId, budget: &Budget) {
        let timeout = Duration::from_secs(self.config.export.completion_timeout_secs);
        let started = Instant::now();
        let mut delay = Duration::from_secs(3);

        loop {
            if started.elapsed() >= timeout {
                tracing::warn!(
                    task_id = %task_id,
                    timeout_secs = timeout.as_secs(),
                    "Gave up waiting for export task completion"
                );
                return;
            }
            if budget.exhausted() {
                tracing::warn!(
                    task_id = %task_id,
                    "Invocation budget exhausted while waiting for export task"
                );
                return;
            }

            match self.logs.export_task_state(task_id).await {
                Ok(state) if state.is_terminal() => {
                    tracing::info!(task_id = %task_id, state = %state, "Export task finished");
                    return;
                }
                Ok(state) => {
                    tracing::debug!(task_id = %task_id, state = %state, "Export task in flight");
                }
                Err(e) => {
                    tracing::warn!(
                        task_id = %task_id,
                        error = %e,
                        "Failed to poll export task state, not waiting further"
                    );
                    return;
                }
            }

            let mut sleep_for = delay;
            if let Some(remaining) = budget.remaining() {
                sleep_for = sleep_for.min(remaining);
            }
            tokio::time::sleep(sleep_for).await;
            delay = (delay * 2).min(Duration::from_secs(60));
        }
    }
}
