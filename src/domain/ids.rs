//! Domain identifier types with validation
//!
//! Newtype wrappers for CloudWatch identifiers. Each type ensures type
//! safety and validates format on construction.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum length of a CloudWatch log group name.
const MAX_LOG_GROUP_NAME_LEN: usize = 512;

/// Log group name newtype wrapper
///
/// Represents the name of a CloudWatch Logs log group, the unit of export
/// granularity.
///
/// # Examples
///
/// ```
/// use logship::domain::ids::LogGroupName;
/// use std::str::FromStr;
///
/// let name = LogGroupName::from_str("/aws/lambda/api").unwrap();
/// assert_eq!(name.as_str(), "/aws/lambda/api");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogGroupName(String);

impl LogGroupName {
    /// Creates a new LogGroupName from a string
    ///
    /// # Errors
    ///
    /// Returns `Err` if the name is empty, too long, or contains
    /// characters CloudWatch does not allow in log group names.
    pub fn new(name: impl Into<String>) -> Result<Self, String> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err("Log group name cannot be empty".to_string());
        }
        if name.len() > MAX_LOG_GROUP_NAME_LEN {
            return Err(format!(
                "Log group name exceeds {} characters: {}",
                MAX_LOG_GROUP_NAME_LEN, name
            ));
        }
        // CloudWatch allows alphanumerics plus '_', '-', '/', '.', '#'
        if let Some(c) = name
            .chars()
            .find(|c| !c.is_ascii_alphanumeric() && !matches!(c, '_' | '-' | '/' | '.' | '#'))
        {
            return Err(format!(
                "Log group name contains invalid character '{}': {}",
                c, name
            ));
        }
        Ok(Self(name))
    }

    /// Returns the log group name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for LogGroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LogGroupName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for LogGroupName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Export task identifier newtype wrapper
///
/// Identifier of a provider-side export task, returned by a successful
/// export submission. Completion tracking belongs to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(String);

impl TaskId {
    /// Creates a new TaskId from a string
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Task ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the task ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for TaskId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_group_name_valid() {
        let name = LogGroupName::new("/aws/lambda/my-function").unwrap();
        assert_eq!(name.as_str(), "/aws/lambda/my-function");
    }

    #[test]
    fn test_log_group_name_empty() {
        assert!(LogGroupName::new("").is_err());
        assert!(LogGroupName::new("   ").is_err());
    }

    #[test]
    fn test_log_group_name_invalid_character() {
        let err = LogGroupName::new("/app/api logs").unwrap_err();
        assert!(err.contains("invalid character"));
    }

    #[test]
    fn test_log_group_name_too_long() {
        let long = "a".repeat(513);
        assert!(LogGroupName::new(long).is_err());
    }

    #[test]
    fn test_log_group_name_from_str() {
        let name: LogGroupName = "/app/worker".parse().unwrap();
        assert_eq!(name.to_string(), "/app/worker");
    }

    #[test]
    fn test_task_id_valid() {
        let id = TaskId::new("0e3a95e4-89f2-4c0f-8d1e-3c1f9d0a2b61").unwrap();
        assert_eq!(id.as_str(), "0e3a95e4-89f2-4c0f-8d1e-3c1f9d0a2b61");
    }

    #[test]
    fn test_task_id_empty() {
        assert!(TaskId::new("").is_err());
    }
}
