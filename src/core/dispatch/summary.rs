//! Dispatch summary and per-entry outcomes
//!
//! One invocation produces one [`DispatchSummary`]: the window it covered
//! and an outcome per configured log group, in dispatch order. The Lambda
//! entry point returns the summary as its JSON response.

use crate::core::dispatch::window::ExportWindow;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

/// What happened to one log group entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "disposition", rename_all = "snake_case")]
pub enum EntryDisposition {
    /// Export task submitted
    Submitted { task_id: String },

    /// Dry-run mode: request built and logged, nothing submitted
    SubmittedDryRun,

    /// Rejected: another export task is already pending (provider allows
    /// one at a time); not retried this invocation
    AlreadyPending,

    /// The configured log group does not exist
    MissingGroup,

    /// Submission failed for another non-fatal reason
    Failed { reason: String },

    /// Invocation budget expired before this entry was reached
    NotAttempted,
}

/// Outcome for one configured log group
#[derive(Debug, Clone, Serialize)]
pub struct EntryOutcome {
    /// Log group name as configured
    pub log_group: String,

    /// What happened
    #[serde(flatten)]
    pub disposition: EntryDisposition,
}

/// Summary of one dispatch invocation
#[derive(Debug, Clone, Serialize)]
pub struct DispatchSummary {
    /// Start of the export window
    pub window_from: DateTime<Utc>,

    /// End of the export window
    pub window_to: DateTime<Utc>,

    /// Per-entry outcomes in dispatch order
    pub outcomes: Vec<EntryOutcome>,

    /// Wall-clock duration of the invocation in milliseconds
    pub duration_ms: u64,
}

impl DispatchSummary {
    /// Creates an empty summary for the given window
    pub fn new(window: &ExportWindow) -> Self {
        Self {
            window_from: window.from(),
            window_to: window.to(),
            outcomes: Vec::new(),
            duration_ms: 0,
        }
    }

    /// Records the outcome for one log group
    pub fn record(&mut self, log_group: impl Into<String>, disposition: EntryDisposition) {
        self.outcomes.push(EntryOutcome {
            log_group: log_group.into(),
            disposition,
        });
    }

    /// Sets the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration_ms = duration.as_millis() as u64;
        self
    }

    /// Number of submitted tasks (including dry-run submissions)
    pub fn submitted(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| {
                matches!(
                    o.disposition,
                    EntryDisposition::Submitted { .. } | EntryDisposition::SubmittedDryRun
                )
            })
            .count()
    }

    /// Number of entries skipped because a task was already pending
    pub fn already_pending(&self) -> usize {
        self.count(|d| matches!(d, EntryDisposition::AlreadyPending))
    }

    /// Number of entries naming a missing log group
    pub fn missing_groups(&self) -> usize {
        self.count(|d| matches!(d, EntryDisposition::MissingGroup))
    }

    /// Number of entries that failed for another reason
    pub fn failed(&self) -> usize {
        self.count(|d| matches!(d, EntryDisposition::Failed { .. }))
    }

    /// Number of entries not reached before the budget expired
    pub fn not_attempted(&self) -> usize {
        self.count(|d| matches!(d, EntryDisposition::NotAttempted))
    }

    /// Whether every entry was submitted
    pub fn is_clean(&self) -> bool {
        self.submitted() == self.outcomes.len()
    }

    fn count(&self, pred: impl Fn(&EntryDisposition) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(&o.disposition)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn summary() -> DispatchSummary {
        let now = Utc.with_ymd_and_hms(2026, 8, 24, 0, 0, 0).unwrap();
        DispatchSummary::new(&ExportWindow::lookback(now, 24))
    }

    #[test]
    fn test_counts() {
        let mut s = summary();
        s.record(
            "/app/api",
            EntryDisposition::Submitted {
                task_id: "t-1".to_string(),
            },
        );
        s.record("/app/worker", EntryDisposition::AlreadyPending);
        s.record("/app/gone", EntryDisposition::MissingGroup);
        s.record(
            "/app/flaky",
            EntryDisposition::Failed {
                reason: "throttled".to_string(),
            },
        );
        s.record("/app/late", EntryDisposition::NotAttempted);

        assert_eq!(s.submitted(), 1);
        assert_eq!(s.already_pending(), 1);
        assert_eq!(s.missing_groups(), 1);
        assert_eq!(s.failed(), 1);
        assert_eq!(s.not_attempted(), 1);
        assert!(!s.is_clean());
    }

    #[test]
    fn test_is_clean_all_submitted() {
        let mut s = summary();
        s.record(
            "/app/api",
            EntryDisposition::Submitted {
                task_id: "t-1".to_string(),
            },
        );
        s.record("/app/worker", EntryDisposition::SubmittedDryRun);
        assert!(s.is_clean());
    }

    #[test]
    fn test_serializes_to_json() {
        let mut s = summary();
        s.record(
            "/app/api",
            EntryDisposition::Submitted {
                task_id: "t-1".to_string(),
            },
        );
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["outcomes"][0]["log_group"], "/app/api");
        assert_eq!(json["outcomes"][0]["disposition"], "submitted");
        assert_eq!(json["outcomes"][0]["task_id"], "t-1");
    }
}
