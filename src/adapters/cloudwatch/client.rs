//! CloudWatch Logs client adapter
//!
//! Wraps the AWS SDK client behind [`LogsClient`] and maps the provider's
//! error codes onto [`LogsError`] so nothing above this layer sees SDK
//! types.

use crate::adapters::traits::{ExportTaskInfo, ExportTaskState, LogsClient};
use crate::domain::errors::LogsError;
use crate::domain::ids::TaskId;
use crate::domain::request::ExportRequest;
use async_trait::async_trait;
use aws_sdk_cloudwatchlogs::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_cloudwatchlogs::types::ExportTaskStatusCode;

/// CloudWatch Logs adapter backed by the AWS SDK
#[derive(Debug, Clone)]
pub struct CloudWatchLogsClient {
    client: aws_sdk_cloudwatchlogs::Client,
}

impl CloudWatchLogsClient {
    /// Creates an adapter from a shared AWS configuration
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_cloudwatchlogs::Client::new(config),
        }
    }
}

#[async_trait]
impl LogsClient for CloudWatchLogsClient {
    async fn create_export_task(
        &self,
        request: &ExportRequest,
    ) -> std::result::Result<TaskId, LogsError> {
        let output = self
            .client
            .create_export_task()
            .task_name(request.task_name())
            .log_group_name(request.log_group().as_str())
            .from(request.from_millis())
            .to(request.to_millis())
            .destination(request.destination_bucket())
            .destination_prefix(request.destination_prefix())
            .send()
            .await
            .map_err(map_logs_error)?;

        let task_id = output.task_id().ok_or_else(|| {
            LogsError::Unexpected("CreateExportTask returned no task ID".to_string())
        })?;

        TaskId::new(task_id).map_err(LogsError::Unexpected)
    }

    async fn export_task_state(
        &self,
        task_id: &TaskId,
    ) -> std::result::Result<ExportTaskState, LogsError> {
        let output = self
            .client
            .describe_export_tasks()
            .task_id(task_id.as_str())
            .send()
            .await
            .map_err(map_logs_error)?;

        let task = output
            .export_tasks()
            .first()
            .ok_or_else(|| LogsError::Unexpected(format!("Export task not found: {task_id}")))?;

        Ok(task
            .status()
            .and_then(|s| s.code())
            .map(map_status_code)
            .unwrap_or(ExportTaskState::Unknown))
    }

    async fn list_export_tasks(
        &self,
        limit: usize,
    ) -> std::result::Result<Vec<ExportTaskInfo>, LogsError> {
        let output = self
            .client
            .describe_export_tasks()
            .limit(limit.min(50) as i32)
            .send()
            .await
            .map_err(map_logs_error)?;

        Ok(output
            .export_tasks()
            .iter()
            .map(|task| ExportTaskInfo {
                task_id: task.task_id().unwrap_or_default().to_string(),
                task_name: task.task_name().unwrap_or_default().to_string(),
                log_group: task.log_group_name().unwrap_or_default().to_string(),
                destination: task.destination().unwrap_or_default().to_string(),
                state: task
                    .status()
                    .and_then(|s| s.code())
                    .map(map_status_code)
                    .unwrap_or(ExportTaskState::Unknown),
            })
            .collect())
    }
}

fn map_status_code(code: &ExportTaskStatusCode) -> ExportTaskState {
    match code {
        ExportTaskStatusCode::Pending => ExportTaskState::Pending,
        ExportTaskStatusCode::PendingCancel => ExportTaskState::PendingCancel,
        ExportTaskStatusCode::Running => ExportTaskState::Running,
        ExportTaskStatusCode::Completed => ExportTaskState::Completed,
        ExportTaskStatusCode::Cancelled => ExportTaskState::Cancelled,
        ExportTaskStatusCode::Failed => ExportTaskState::Failed,
        _ => ExportTaskState::Unknown,
    }
}

/// Maps an SDK error onto the domain error taxonomy by provider error code
///
/// `LimitExceededException` is the provider's one-pending-export-task
/// rejection, not a quota problem.
fn map_logs_error<E, R>(err: SdkError<E, R>) -> LogsError
where
    E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
{
    let message = err
        .message()
        .map(str::to_string)
        .unwrap_or_else(|| format!("{err}"));
    classify(err.code(), message)
}

fn classify(code: Option<&str>, message: String) -> LogsError {
    match code {
        Some("LimitExceededException") => LogsError::TaskAlreadyPending(message),
        Some("ResourceNotFoundException") => LogsError::LogGroupNotFound(message),
        Some("InvalidParameterException") => LogsError::InvalidParameter(message),
        Some("ResourceAlreadyExistsException") => LogsError::TaskAlreadyExists(message),
        Some("OperationAbortedException") | Some("ThrottlingException") => {
            LogsError::Throttled(message)
        }
        Some("ServiceUnavailableException") => LogsError::ServiceUnavailable(message),
        Some("AccessDeniedException")
        | Some("UnrecognizedClientException")
        | Some("ExpiredTokenException")
        | Some("InvalidClientTokenId") => LogsError::AccessDenied(message),
        _ => LogsError::Unexpected(message),
    }
}
