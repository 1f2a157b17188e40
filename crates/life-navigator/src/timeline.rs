//! Deadline buckets and category filtering for task lists

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use navigator_common::{CategoryFilter, Task};
use serde::Serialize;
use tracing::warn;

/// Default width of the "upcoming" bucket
pub const DEFAULT_UPCOMING_DAYS: i64 = 7;

/// Tasks partitioned by deadline. Each bucket keeps input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    pub overdue: Vec<Task>,
    pub upcoming: Vec<Task>,
    pub future: Vec<Task>,
    pub no_deadline: Vec<Task>,
}

impl Timeline {
    pub fn len(&self) -> usize {
        self.overdue.len() + self.upcoming.len() + self.future.len() + self.no_deadline.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Parse a stored deadline.
///
/// Accepts RFC 3339, a naive date-time (read as UTC) or a bare date
/// (midnight UTC).
pub fn parse_deadline(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Groups tasks into overdue / upcoming / future / no-deadline buckets
#[derive(Debug, Clone, Copy)]
pub struct TimelineGrouper {
    /// `None` when the window is too wide to represent
    window: Option<TimeDelta>,
}

impl TimelineGrouper {
    pub fn new(upcoming_days: i64) -> Self {
        Self {
            window: TimeDelta::try_days(upcoming_days),
        }
    }

    pub fn group(&self, tasks: &[Task], now: DateTime<Utc>) -> Timeline {
        // An unrepresentable horizon means every dated, non-overdue task is upcoming
        let horizon = self.window.and_then(|window| now.checked_add_signed(window));
        let mut timeline = Timeline::default();

        for task in tasks {
            let Some(raw) = task.deadline.as_deref() else {
                timeline.no_deadline.push(task.clone());
                continue;
            };

            match parse_deadline(raw) {
                Some(deadline) if deadline < now => timeline.overdue.push(task.clone()),
                Some(deadline) if horizon.map_or(true, |h| deadline < h) => {
                    timeline.upcoming.push(task.clone())
                }
                Some(_) => timeline.future.push(task.clone()),
                None => {
                    warn!(task_id = %task.id, deadline = raw, "Unparseable task deadline, treating as none");
                    timeline.no_deadline.push(task.clone());
                }
            }
        }

        timeline
    }
}

impl Default for TimelineGrouper {
    fn default() -> Self {
        Self::new(DEFAULT_UPCOMING_DAYS)
    }
}

/// Group with the default seven-day window
pub fn group_by_deadline(tasks: &[Task], now: DateTime<Utc>) -> Timeline {
    TimelineGrouper::default().group(tasks, now)
}

/// Tasks matching the filter, in their original order
pub fn filter_by_category(tasks: &[Task], filter: CategoryFilter) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| filter.matches(task.category))
        .cloned()
        .collect()
}
