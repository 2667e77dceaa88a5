//! Statistics over the whole task collection
//!
//! Filters never apply here. Counts are recomputed from the snapshot on
//! every call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::due::is_overdue;
use super::task::{Task, TaskStatus};

/// Summary counts for a task collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
    /// Incomplete tasks whose due date has passed
    pub overdue: usize,
}

/// Computes summary counts, judging overdue tasks against `now`
pub fn compute_stats(tasks: &[Task], now: DateTime<Utc>) -> TaskStats {
    tasks.iter().fold(TaskStats::default(), |mut stats, task| {
        stats.total += 1;
        match task.status {
            TaskStatus::Pending => stats.pending += 1,
            TaskStatus::InProgress => stats.in_progress += 1,
            TaskStatus::Completed => stats.completed += 1,
        }
        if is_overdue(task, now) {
            stats.overdue += 1;
        }
        stats
    })
}
