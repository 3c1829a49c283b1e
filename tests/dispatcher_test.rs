//! Integration tests for the export dispatcher
//!
//! The dispatcher is exercised against scripted mock adapters; no AWS
//! calls are made.

use async_trait::async_trait;
use chrono::Utc;
use logship::adapters::traits::{BucketProbe, ExportTaskInfo, ExportTaskState, LogsClient};
use logship::config::{
    ApplicationConfig, DestinationConfig, ExportConfig, ExporterConfig, LoggingConfig,
    WindowConfig,
};
use logship::core::dispatch::summary::EntryDisposition;
use logship::core::dispatch::{Budget, Dispatcher};
use logship::domain::errors::{ExporterError, LogsError, StorageError};
use logship::domain::ids::TaskId;
use logship::domain::request::ExportRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One recorded export submission
#[derive(Debug, Clone)]
struct RecordedCall {
    log_group: String,
    bucket: String,
    prefix: String,
    from_millis: i64,
    to_millis: i64,
}

/// Scripted mock of the log export service
#[derive(Default)]
struct MockLogs {
    calls: Mutex<Vec<RecordedCall>>,
    /// Responses popped per submission; empty means success
    responses: Mutex<VecDeque<Result<TaskId, LogsError>>>,
    /// States popped per status poll; empty means Completed
    states: Mutex<VecDeque<Result<ExportTaskState, LogsError>>>,
    state_polls: Mutex<usize>,
    /// Delay injected into each submission, for budget tests
    submit_delay: Option<Duration>,
}

impl MockLogs {
    fn with_responses(responses: Vec<Result<TaskId, LogsError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            ..Default::default()
        }
    }

    fn recorded(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

fn task_id(s: &str) -> TaskId {
    TaskId::new(s).unwrap()
}

#[async_trait]
impl LogsClient for MockLogs {
    async fn create_export_task(&self, request: &ExportRequest) -> Result<TaskId, LogsError> {
        if let Some(delay) = self.submit_delay {
            tokio::time::sleep(delay).await;
        }
        self.calls.lock().unwrap().push(RecordedCall {
            log_group: request.log_group().to_string(),
            bucket: request.destination_bucket().to_string(),
            prefix: request.destination_prefix().to_string(),
            from_millis: request.from_millis(),
            to_millis: request.to_millis(),
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(task_id("task-default")))
    }

    async fn export_task_state(&self, _task_id: &TaskId) -> Result<ExportTaskState, LogsError> {
        *self.state_polls.lock().unwrap() += 1;
        self.states
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(ExportTaskState::Completed))
    }

    async fn list_export_tasks(&self, _limit: usize) -> Result<Vec<ExportTaskInfo>, LogsError> {
        Ok(Vec::new())
    }
}

/// Bucket probe with a fixed answer
struct MockProbe {
    result: Mutex<Option<StorageError>>,
}

impl MockProbe {
    fn ok() -> Self {
        Self {
            result: Mutex::new(None),
        }
    }

    fn failing(err: StorageError) -> Self {
        Self {
            result: Mutex::new(Some(err)),
        }
    }
}

#[async_trait]
impl BucketProbe for MockProbe {
    async fn verify_bucket(&self, _bucket: &str) -> Result<(), StorageError> {
        match self.result.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn test_config(log_groups: &[&str]) -> ExporterConfig {
    ExporterConfig {
        application: ApplicationConfig::default(),
        destination: DestinationConfig {
            bucket: "cw-log-exports".to_string(),
            prefix: "exports".to_string(),
        },
        export: ExportConfig {
            log_groups: log_groups.iter().map(|s| s.to_string()).collect(),
            task_name_prefix: "logship".to_string(),
            wait_for_completion: false,
            completion_timeout_secs: 300,
            budget_reserve_secs: 0,
        },
        window: WindowConfig::default(),
        logging: LoggingConfig::default(),
    }
}

fn dispatcher(config: ExporterConfig, logs: Arc<MockLogs>, probe: Arc<MockProbe>) -> Dispatcher {
    Dispatcher::new(config, logs, probe)
}

#[tokio::test]
async fn dispatch_submits_one_task_per_group_in_order() {
    let logs = Arc::new(MockLogs::with_responses(vec![
        Ok(task_id("task-1")),
        Ok(task_id("task-2")),
    ]));
    let d = dispatcher(
        test_config(&["/app/api", "/app/worker"]),
        logs.clone(),
        Arc::new(MockProbe::ok()),
    );

    let before = Utc::now();
    let summary = d.dispatch(Budget::unbounded()).await.unwrap();
    let after = Utc::now();

    let calls = logs.recorded();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].log_group, "/app/api");
    assert_eq!(calls[1].log_group, "/app/worker");
    assert_eq!(calls[0].bucket, "cw-log-exports");

    // Window: start = now - 24h, end = now, shared by both requests
    assert_eq!(calls[0].from_millis, calls[1].from_millis);
    assert_eq!(calls[0].to_millis, calls[1].to_millis);
    assert!(calls[0].to_millis >= before.timestamp_millis());
    assert!(calls[0].to_millis <= after.timestamp_millis());
    assert_eq!(
        calls[0].to_millis - calls[0].from_millis,
        Duration::from_secs(24 * 3600).as_millis() as i64
    );

    assert_eq!(summary.submitted(), 2);
    assert!(summary.is_clean());
    assert!(matches!(
        summary.outcomes[0].disposition,
        EntryDisposition::Submitted { ref task_id } if task_id == "task-1"
    ));
}

#[tokio::test]
async fn dispatch_builds_date_partitioned_prefixes() {
    let logs = Arc::new(MockLogs::default());
    let d = dispatcher(
        test_config(&["/aws/lambda/api"]),
        logs.clone(),
        Arc::new(MockProbe::ok()),
    );

    d.dispatch(Budget::unbounded()).await.unwrap();

    let calls = logs.recorded();
    assert_eq!(calls.len(), 1);
    assert!(
        calls[0].prefix.starts_with("exports/aws-lambda-api/"),
        "unexpected prefix: {}",
        calls[0].prefix
    );
}

#[tokio::test]
async fn missing_log_group_is_skipped_and_later_entries_still_run() {
    let logs = Arc::new(MockLogs::with_responses(vec![
        Err(LogsError::LogGroupNotFound("/app/gone".to_string())),
        Ok(task_id("task-2")),
    ]));
    let d = dispatcher(
        test_config(&["/app/gone", "/app/worker"]),
        logs.clone(),
        Arc::new(MockProbe::ok()),
    );

    let summary = d.dispatch(Budget::unbounded()).await.unwrap();

    assert_eq!(logs.recorded().len(), 2);
    assert!(matches!(
        summary.outcomes[0].disposition,
        EntryDisposition::MissingGroup
    ));
    assert!(matches!(
        summary.outcomes[1].disposition,
        EntryDisposition::Submitted { .. }
    ));
    assert_eq!(summary.missing_groups(), 1);
    assert_eq!(summary.submitted(), 1);
}

#[tokio::test]
async fn bucket_probe_failure_aborts_before_any_submission() {
    let logs = Arc::new(MockLogs::default());
    let d = dispatcher(
        test_config(&["/app/api", "/app/worker"]),
        logs.clone(),
        Arc::new(MockProbe::failing(StorageError::BucketNotFound(
            "cw-log-exports".to_string(),
        ))),
    );

    let err = d.dispatch(Budget::unbounded()).await.unwrap_err();
    assert!(matches!(err, ExporterError::Storage(_)));
    assert!(logs.recorded().is_empty());
}

#[tokio::test]
async fn already_pending_is_recorded_and_run_completes() {
    let logs = Arc::new(MockLogs::with_responses(vec![
        Ok(task_id("task-1")),
        Err(LogsError::TaskAlreadyPending("task-1 pending".to_string())),
        Err(LogsError::TaskAlreadyPending("task-1 pending".to_string())),
    ]));
    let d = dispatcher(
        test_config(&["/app/api", "/app/worker", "/app/cron"]),
        logs.clone(),
        Arc::new(MockProbe::ok()),
    );

    let summary = d.dispatch(Budget::unbounded()).await.unwrap();

    assert_eq!(logs.recorded().len(), 3);
    assert_eq!(summary.submitted(), 1);
    assert_eq!(summary.already_pending(), 2);
    assert!(!summary.is_clean());
}

#[tokio::test]
async fn budget_expiry_truncates_remaining_groups() {
    let logs = Arc::new(MockLogs {
        submit_delay: Some(Duration::from_millis(50)),
        ..Default::default()
    });
    let d = dispatcher(
        test_config(&["/app/api", "/app/worker", "/app/cron"]),
        logs.clone(),
        Arc::new(MockProbe::ok()),
    );

    // Enough budget to start the first submission, not to outlive it
    let budget = Budget::from_remaining(Duration::from_millis(20), Duration::ZERO);
    let summary = d.dispatch(budget).await.unwrap();

    assert_eq!(logs.recorded().len(), 1);
    assert_eq!(summary.submitted(), 1);
    assert_eq!(summary.not_attempted(), 2);
    assert!(matches!(
        summary.outcomes[1].disposition,
        EntryDisposition::NotAttempted
    ));
    assert!(matches!(
        summary.outcomes[2].disposition,
        EntryDisposition::NotAttempted
    ));
}

#[tokio::test]
async fn access_denied_is_fatal_for_the_invocation() {
    let logs = Arc::new(MockLogs::with_responses(vec![Err(
        LogsError::AccessDenied("no logs:CreateExportTask".to_string()),
    )]));
    let d = dispatcher(
        test_config(&["/app/api", "/app/worker"]),
        logs.clone(),
        Arc::new(MockProbe::ok()),
    );

    let err = d.dispatch(Budget::unbounded()).await.unwrap_err();
    assert!(matches!(err, ExporterError::Logs(LogsError::AccessDenied(_))));
    // First entry attempted, second never reached
    assert_eq!(logs.recorded().len(), 1);
}

#[tokio::test]
async fn transient_failure_is_recorded_and_loop_continues() {
    let logs = Arc::new(MockLogs::with_responses(vec![
        Err(LogsError::Throttled("slow down".to_string())),
        Ok(task_id("task-2")),
    ]));
    let d = dispatcher(
        test_config(&["/app/api", "/app/worker"]),
        logs.clone(),
        Arc::new(MockProbe::ok()),
    );

    let summary = d.dispatch(Budget::unbounded()).await.unwrap();
    assert_eq!(summary.failed(), 1);
    assert_eq!(summary.submitted(), 1);
}

#[tokio::test]
async fn dry_run_submits_nothing() {
    let logs = Arc::new(MockLogs::default());
    let mut config = test_config(&["/app/api", "/app/worker"]);
    config.application.dry_run = true;
    let d = dispatcher(config, logs.clone(), Arc::new(MockProbe::ok()));

    let summary = d.dispatch(Budget::unbounded()).await.unwrap();

    assert!(logs.recorded().is_empty());
    assert_eq!(summary.submitted(), 2);
    assert!(summary
        .outcomes
        .iter()
        .all(|o| matches!(o.disposition, EntryDisposition::SubmittedDryRun)));
}

#[tokio::test]
async fn wait_for_completion_polls_until_terminal() {
    let logs = Arc::new(MockLogs {
        states: Mutex::new(VecDeque::from([Ok(ExportTaskState::Completed)])),
        ..Default::default()
    });
    let mut config = test_config(&["/app/api"]);
    config.export.wait_for_completion = true;
    let d = dispatcher(config, logs.clone(), Arc::new(MockProbe::ok()));

    let summary = d.dispatch(Budget::unbounded()).await.unwrap();

    assert_eq!(summary.submitted(), 1);
    assert_eq!(*logs.state_polls.lock().unwrap(), 1);
}

#[tokio::test]
async fn wait_for_completion_stops_on_poll_failure() {
    let logs = Arc::new(MockLogs {
        states: Mutex::new(VecDeque::from([Err(LogsError::Unexpected(
            "boom".to_string(),
        ))])),
        ..Default::default()
    });
    let mut config = test_config(&["/app/api"]);
    config.export.wait_for_completion = true;
    let d = dispatcher(config, logs.clone(), Arc::new(MockProbe::ok()));

    // A failed status poll must not fail the dispatch
    let summary = d.dispatch(Budget::unbounded()).await.unwrap();
    assert_eq!(summary.submitted(), 1);
}
