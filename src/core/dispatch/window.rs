//! Export window computation
//!
//! The window is computed once per invocation and shared by every export
//! request in the batch. Two policies exist:
//!
//! - **Lookback** (default): `[now - lookback_hours, now]`. Simple and
//!   matches "export what happened recently"; overlap between runs is the
//!   operator's schedule-rate concern since the provider keeps no record of
//!   what was already exported.
//! - **Age offset**: the 24-hour slice that is `age_offset_days` old,
//!   `[now - (days + 1), now - days]`. Run daily, this archives each day's
//!   logs exactly once, right before retention would expire them.

use crate::config::schema::{WindowConfig, WindowMode};
use crate::domain::ids::LogGroupName;
use chrono::{DateTime, Duration, Utc};

/// A bounded export time range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportWindow {
    from: DateTime<Utc>,
    to: DateTime<Utc>,
}

impl ExportWindow {
    /// Fixed window ending at `now`
    pub fn lookback(now: DateTime<Utc>, hours: u64) -> Self {
        Self {
            from: now - Duration::hours(hours as i64),
            to: now,
        }
    }

    /// The 24-hour slice that is `days` old
    pub fn age_offset(now: DateTime<Utc>, days: u64) -> Self {
        Self {
            from: now - Duration::days(days as i64 + 1),
            to: now - Duration::days(days as i64),
        }
    }

    /// Builds the window for this invocation from configuration
    pub fn from_config(now: DateTime<Utc>, config: &WindowConfig) -> Self {
        match config.mode {
            WindowMode::Lookback => Self::lookback(now, config.lookback_hours),
            WindowMode::AgeOffset => Self::age_offset(now, config.age_offset_days),
        }
    }

    /// Start of the range (inclusive)
    pub fn from(&self) -> DateTime<Utc> {
        self.from
    }

    /// End of the range (exclusive)
    pub fn to(&self) -> DateTime<Utc> {
        self.to
    }

    /// Date partition of the window start, `YYYY-MM-DD`
    pub fn start_date(&self) -> String {
        self.from.format("%Y-%m-%d").to_string()
    }
}

/// Builds the destination key prefix for one log group
///
/// Layout: `<root>/<group-with-slashes-as-dashes>/<YYYY-MM-DD>`, with the
/// log group's leading slash dropped so keys don't start with a dash. An
/// empty root prefix is omitted.
pub fn destination_prefix(root: &str, log_group: &LogGroupName, window: &ExportWindow) -> String {
    let group_part = log_group
        .as_str()
        .trim_start_matches('/')
        .replace('/', "-");
    let date_part = window.start_date();
    if root.is_empty() {
        format!("{group_part}/{date_part}")
    } else {
        let root = root.trim_end_matches('/');
        format!("{root}/{group_part}/{date_part}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 24, 12, 30, 0).unwrap()
    }

    #[test]
    fn test_lookback_window_ends_at_now() {
        let window = ExportWindow::lookback(now(), 24);
        assert_eq!(window.to(), now());
        assert_eq!(window.from(), now() - Duration::hours(24));
    }

    #[test]
    fn test_age_offset_window_is_one_day_wide() {
        let window = ExportWindow::age_offset(now(), 90);
        assert_eq!(window.from(), now() - Duration::days(91));
        assert_eq!(window.to(), now() - Duration::days(90));
        assert_eq!(window.to() - window.from(), Duration::days(1));
    }

    #[test]
    fn test_from_config_selects_mode() {
        let config = WindowConfig {
            mode: WindowMode::AgeOffset,
            lookback_hours: 24,
            age_offset_days: 30,
        };
        let window = ExportWindow::from_config(now(), &config);
        assert_eq!(window.to(), now() - Duration::days(30));

        let config = WindowConfig {
            mode: WindowMode::Lookback,
            lookback_hours: 6,
            age_offset_days: 30,
        };
        let window = ExportWindow::from_config(now(), &config);
        assert_eq!(window.from(), now() - Duration::hours(6));
    }

    #[test]
    fn test_start_date_is_zero_padded() {
        let window = ExportWindow::lookback(Utc.with_ymd_and_hms(2026, 3, 5, 1, 0, 0).unwrap(), 1);
        assert_eq!(window.start_date(), "2026-03-05");
    }

    #[test_case::test_case("exports", "/aws/lambda/api", "exports/aws-lambda-api/2026-08-23" ; "with root prefix")]
    #[test_case::test_case("", "/app/api", "app-api/2026-08-23" ; "without root prefix")]
    #[test_case::test_case("exports/", "/app/api", "exports/app-api/2026-08-23" ; "trailing slash on root")]
    #[test_case::test_case("exports", "no-slashes", "exports/no-slashes/2026-08-23" ; "group without slashes")]
    fn test_destination_prefix(root: &str, group: &str, expected: &str) {
        let group = LogGroupName::new(group).unwrap();
        let window = ExportWindow::lookback(now(), 24);
        assert_eq!(destination_prefix(root, &group, &window), expected);
    }
}
