//! Adapter abstraction traits
//!
//! This module defines the traits the dispatcher depends on. The AWS SDK
//! implementations live in [`crate::adapters::cloudwatch`] and
//! [`crate::adapters::s3`]; tests substitute scripted mocks.

use crate::domain::errors::{LogsError, StorageError};
use crate::domain::ids::TaskId;
use crate::domain::request::ExportRequest;
use async_trait::async_trait;
use serde::Serialize;

/// Provider-side state of an export task
///
/// Only the terminal states matter to the dispatcher; everything else is
/// "still in flight".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ExportTaskState {
    /// Queued, not yet running
    Pending,
    /// Cancellation requested
    PendingCancel,
    /// Copying log data
    Running,
    /// Finished successfully
    Completed,
    /// Cancelled by the operator
    Cancelled,
    /// Finished with an error
    Failed,
    /// Status code the provider added after this was written
    Unknown,
}

impl ExportTaskState {
    /// Whether the task has reached a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ExportTaskState::Completed | ExportTaskState::Cancelled | ExportTaskState::Failed
        )
    }
}

impl std::fmt::Display for ExportTaskState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ExportTaskState::Pending => "PENDING",
            ExportTaskState::PendingCancel => "PENDING_CANCEL",
            ExportTaskState::Running => "RUNNING",
            ExportTaskState::Completed => "COMPLETED",
            ExportTaskState::Cancelled => "CANCELLED",
            ExportTaskState::Failed => "FAILED",
            ExportTaskState::Unknown => "UNKNOWN",
        };
        write!(f, "{s}")
    }
}

/// Summary of a provider-side export task, for status reporting
#[derive(Debug, Clone, Serialize)]
pub struct ExportTaskInfo {
    /// Provider task identifier
    pub task_id: String,

    /// Task name supplied at submission
    pub task_name: String,

    /// Exported log group
    pub log_group: String,

    /// Destination bucket
    pub destination: String,

    /// Current state
    pub state: ExportTaskState,
}

/// Client trait for the log export service
///
/// The dispatcher submits export requests and polls task state through this
/// trait; the production implementation wraps the CloudWatch Logs SDK.
#[async_trait]
pub trait LogsClient: Send + Sync {
    /// Submit one export task
    ///
    /// # Errors
    ///
    /// Returns a [`LogsError`] mapped from the provider's error code. A
    /// [`LogsError::TaskAlreadyPending`] means the account-wide
    /// one-pending-task limit was hit; callers must not retry within the
    /// same invocation.
    async fn create_export_task(
        &self,
        request: &ExportRequest,
    ) -> std::result::Result<TaskId, LogsError>;

    /// Fetch the current state of a previously submitted task
    ///
    /// # Errors
    ///
    /// Returns an error if the task cannot be described.
    async fn export_task_state(
        &self,
        task_id: &TaskId,
    ) -> std::result::Result<ExportTaskState, LogsError>;

    /// List recent export tasks, newest first as returned by the provider
    ///
    /// # Errors
    ///
    /// Returns an error if the listing call fails.
    async fn list_export_tasks(
        &self,
        limit: usize,
    ) -> std::result::Result<Vec<ExportTaskInfo>, LogsError>;
}

/// Probe trait for the destination bucket
///
/// A cheap existence/permission check run once per invocation, before any
/// export is submitted.
#[async_trait]
pub trait BucketProbe: Send + Sync {
    /// Verify the destination bucket exists and is reachable
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`]; every variant is fatal for the
    /// invocation.
    async fn verify_bucket(&self, bucket: &str) -> std::result::Result<(), StorageError>;
}
