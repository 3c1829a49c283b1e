//! Export request model
//!
//! An [`ExportRequest`] captures everything the provider needs to create
//! one export task: the log group, the bounded time range, and the S3
//! destination. Requests are immutable once built; the provider owns the
//! rest of the task lifecycle.

use crate::domain::ids::LogGroupName;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A single export task submission
#[derive(Debug, Clone, Serialize)]
pub struct ExportRequest {
    /// Provider-visible task name (unique per submission)
    task_name: String,

    /// Log group to export
    log_group: LogGroupName,

    /// Destination bucket name
    destination_bucket: String,

    /// Key prefix inside the destination bucket
    destination_prefix: String,

    /// Start of the export time range (inclusive)
    from: DateTime<Utc>,

    /// End of the export time range (exclusive)
    to: DateTime<Utc>,
}

impl ExportRequest {
    /// Creates a new export request
    ///
    /// # Errors
    ///
    /// Returns `Err` if the time range is empty or inverted, or the
    /// destination bucket is empty.
    pub fn new(
        task_name: impl Into<String>,
        log_group: LogGroupName,
        destination_bucket: impl Into<String>,
        destination_prefix: impl Into<String>,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Self, String> {
        let destination_bucket = destination_bucket.into();
        if destination_bucket.trim().is_empty() {
            return Err("Destination bucket cannot be empty".to_string());
        }
        if from >= to {
            return Err(format!(
                "Export time range is empty or inverted: from={} to={}",
                from, to
            ));
        }
        Ok(Self {
            task_name: task_name.into(),
            log_group,
            destination_bucket,
            destination_prefix: destination_prefix.into(),
            from,
            to,
        })
    }

    /// Provider-visible task name
    pub fn task_name(&self) -> &str {
        &self.task_name
    }

    /// Log group to export
    pub fn log_group(&self) -> &LogGroupName {
        &self.log_group
    }

    /// Destination bucket name
    pub fn destination_bucket(&self) -> &str {
        &self.destination_bucket
    }

    /// Key prefix inside the destination bucket
    pub fn destination_prefix(&self) -> &str {
        &self.destination_prefix
    }

    /// Start of the time range
    pub fn from(&self) -> DateTime<Utc> {
        self.from
    }

    /// End of the time range
    pub fn to(&self) -> DateTime<Utc> {
        self.to
    }

    /// Start of the time range as epoch milliseconds (wire format)
    pub fn from_millis(&self) -> i64 {
        self.from.timestamp_millis()
    }

    /// End of the time range as epoch milliseconds (wire format)
    pub fn to_millis(&self) -> i64 {
        self.to.timestamp_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn log_group() -> LogGroupName {
        LogGroupName::new("/app/api").unwrap()
    }

    #[test]
    fn test_export_request_valid() {
        let from = Utc.with_ymd_and_hms(2026, 8, 23, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2026, 8, 24, 0, 0, 0).unwrap();
        let request =
            ExportRequest::new("logship-1", log_group(), "my-bucket", "app-api/2026-8-23", from, to)
                .unwrap();

        assert_eq!(request.task_name(), "logship-1");
        assert_eq!(request.destination_bucket(), "my-bucket");
        assert_eq!(request.from_millis(), from.timestamp_millis());
        assert_eq!(request.to_millis(), to.timestamp_millis());
    }

    #[test]
    fn test_export_request_rejects_inverted_range() {
        let from = Utc.with_ymd_and_hms(2026, 8, 24, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2026, 8, 23, 0, 0, 0).unwrap();
        let result = ExportRequest::new("logship-1", log_group(), "my-bucket", "", from, to);
        assert!(result.is_err());
    }

    #[test]
    fn test_export_request_rejects_empty_range() {
        let at = Utc.with_ymd_and_hms(2026, 8, 24, 0, 0, 0).unwrap();
        let result = ExportRequest::new("logship-1", log_group(), "my-bucket", "", at, at);
        assert!(result.is_err());
    }

    #[test]
    fn test_export_request_rejects_empty_bucket() {
        let from = Utc.with_ymd_and_hms(2026, 8, 23, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2026, 8, 24, 0, 0, 0).unwrap();
        let result = ExportRequest::new("logship-1", log_group(), "  ", "", from, to);
        assert!(result.is_err());
    }
}
