//! Domain error types
//!
//! Error hierarchy for the exporter. All errors are domain-specific and
//! don't expose AWS SDK types; adapters map provider error codes into
//! these variants.

use thiserror::Error;

/// Main exporter error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum ExporterError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// CloudWatch Logs errors
    #[error("CloudWatch Logs error: {0}")]
    Logs(#[from] LogsError),

    /// Destination storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Dispatch process errors
    #[error("Dispatch error: {0}")]
    Dispatch(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// CloudWatch Logs errors
///
/// Errors that occur when submitting or inspecting export tasks.
/// Variants mirror the provider's error codes without exposing SDK types.
#[derive(Debug, Error)]
pub enum LogsError {
    /// The provider allows only one active export task per account; a new
    /// submission while one is pending is rejected with this error.
    #[error("An export task is already pending: {0}")]
    TaskAlreadyPending(String),

    /// The named log group does not exist
    #[error("Log group not found: {0}")]
    LogGroupNotFound(String),

    /// A request parameter was rejected by the provider
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Request was throttled or aborted by a conflicting operation
    #[error("Request throttled: {0}")]
    Throttled(String),

    /// The logging service is temporarily unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Credentials lack the required permissions
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// An export task with the same name already exists
    #[error("Export task already exists: {0}")]
    TaskAlreadyExists(String),

    /// Any other provider or transport failure
    #[error("Unexpected CloudWatch Logs error: {0}")]
    Unexpected(String),
}

impl LogsError {
    /// Whether this error aborts the whole invocation.
    ///
    /// Per-entry conditions (a pending task, a missing log group, transient
    /// throttling) are logged and skipped; a credential failure cannot
    /// succeed for any later entry either, so it is fatal.
    pub fn is_fatal(&self) -> bool {
        matches!(self, LogsError::AccessDenied(_))
    }
}

/// Destination storage errors
///
/// Errors from probing the destination bucket. All of these are fatal for
/// the invocation: if the bucket is missing or unreadable, no export
/// submission can succeed.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Destination bucket does not exist
    #[error("Destination bucket not found: {0}")]
    BucketNotFound(String),

    /// Credentials lack access to the destination bucket
    #[error("Access denied to destination bucket: {0}")]
    AccessDenied(String),

    /// The bucket probe failed for another reason
    #[error("Bucket probe failed: {0}")]
    ProbeFailed(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for ExporterError {
    fn from(err: std::io::Error) -> Self {
        ExporterError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for ExporterError {
    fn from(err: serde_json::Error) -> Self {
        ExporterError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for ExporterError {
    fn from(err: toml::de::Error) -> Self {
        ExporterError::Configuration(format!("TOML parse error: {err}"))
    }
}
