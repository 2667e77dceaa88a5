//! Due-date derivations
//!
//! All functions take "now" explicitly. A due date counts from midnight UTC
//! of that day, and the day difference is rounded up, so a task due today
//! reports 0 for the whole day and a task due yesterday reports -1.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::task::Task;

/// Window (in days, inclusive) for a task to count as due soon
pub const DUE_SOON_DAYS: i64 = 3;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Whole days from `now` until `due_date`, rounded up. Negative when overdue.
pub fn days_until_due(due_date: NaiveDate, now: DateTime<Utc>) -> i64 {
    let due = due_date.and_time(chrono::NaiveTime::MIN).and_utc();
    let diff_ms = (due - now).num_milliseconds();

    // ceil(diff / day) for a positive divisor
    -((-diff_ms).div_euclid(MILLIS_PER_DAY))
}

/// Past due and not completed
pub fn is_overdue(task: &Task, now: DateTime<Utc>) -> bool {
    !task.status.is_complete() && days_until_due(task.due_date, now) < 0
}

/// Due within the next [`DUE_SOON_DAYS`] days (today included) and not completed
pub fn is_due_soon(task: &Task, now: DateTime<Utc>) -> bool {
    if task.status.is_complete() {
        return false;
    }
    let days = days_until_due(task.due_date, now);
    (0..=DUE_SOON_DAYS).contains(&days)
}

/// Due-date classification used for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "days", rename_all = "snake_case")]
pub enum DueState {
    /// Past due by this many days
    Overdue(i64),
    /// Due in this many days (0 = today)
    DueSoon(i64),
    Upcoming(i64),
    /// Completed tasks are never late
    Done,
}

impl DueState {
    /// Short human-readable note, if the state warrants one
    pub fn describe(&self) -> Option<String> {
        match self {
            DueState::Overdue(days) => Some(format!("Overdue by {} days", days)),
            DueState::DueSoon(days) => Some(format!("Due in {} day(s)", days)),
            DueState::Upcoming(_) | DueState::Done => None,
        }
    }
}

/// Classifies a task's due date relative to `now`
pub fn due_state(task: &Task, now: DateTime<Utc>) -> DueState {
    if task.status.is_complete() {
        return DueState::Done;
    }

    let days = days_until_due(task.due_date, now);
    if days < 0 {
        DueState::Overdue(days.abs())
    } else if days <= DUE_SOON_DAYS {
        DueState::DueSoon(days)
    } else {
        DueState::Upcoming(days)
    }
}
