//! Task identifiers
//!
//! IDs are plain integers derived from the creation time in milliseconds,
//! matching the numeric IDs in existing `studentTasks` data. When two tasks
//! are created within the same millisecond the later one is bumped past the
//! current maximum, so IDs stay unique and increase with insertion order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IdError {
    #[error("Invalid task ID: expected a positive integer, got '{0}'")]
    InvalidTaskId(String),

    #[error("No task ID left above {0}")]
    Exhausted(i64),
}

/// Unique, immutable task identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(i64);

impl TaskId {
    /// Wraps a raw ID value
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Allocates the next ID for a collection.
    ///
    /// Uses the timestamp in milliseconds unless an existing ID is already
    /// at or beyond it. Fails once the largest ID is `i64::MAX`.
    pub fn next<'a>(
        existing: impl IntoIterator<Item = &'a TaskId>,
        now: DateTime<Utc>,
    ) -> Result<Self, IdError> {
        let candidate = now.timestamp_millis();
        let max = existing.into_iter().map(|id| id.0).max();

        match max {
            Some(max) if max >= candidate => max
                .checked_add(1)
                .map(Self)
                .ok_or(IdError::Exhausted(max)),
            _ => Ok(Self(candidate)),
        }
    }

    /// Returns the raw value
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TaskId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.parse::<i64>() {
            Ok(value) if value > 0 => Ok(Self(value)),
            _ => Err(IdError::InvalidTaskId(s.to_string())),
        }
    }
}

impl From<i64> for TaskId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(millis: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(millis).unwrap()
    }

    #[test]
    fn next_uses_timestamp_for_empty_collection() {
        let id = TaskId::next(&[], at(1_700_000_000_000)).unwrap();
        assert_eq!(id.value(), 1_700_000_000_000);
    }

    #[test]
    fn next_bumps_past_collision() {
        let existing = [TaskId::new(1_700_000_000_000)];
        let id = TaskId::next(&existing, at(1_700_000_000_000)).unwrap();
        assert_eq!(id.value(), 1_700_000_000_001);
    }

    #[test]
    fn next_stays_monotonic_when_clock_goes_backwards() {
        let existing = [TaskId::new(2_000), TaskId::new(5_000)];
        let id = TaskId::next(&existing, at(1_000)).unwrap();
        assert_eq!(id.value(), 5_001);
    }

    #[test]
    fn next_fails_instead_of_wrapping_at_max() {
        let existing = [TaskId::new(7), TaskId::new(i64::MAX)];
        let err = TaskId::next(&existing, at(1_700_000_000_000)).unwrap_err();
        assert_eq!(err, IdError::Exhausted(i64::MAX));
    }

    #[test]
    fn parses_integer_ids() {
        let id: TaskId = " 1736870400000 ".parse().unwrap();
        assert_eq!(id, TaskId::new(1_736_870_400_000));
    }

    #[test]
    fn rejects_invalid_ids() {
        assert!("abc".parse::<TaskId>().is_err());
        assert!("0".parse::<TaskId>().is_err());
        assert!("-4".parse::<TaskId>().is_err());
        assert!("".parse::<TaskId>().is_err());
    }

    #[test]
    fn serializes_as_plain_number() {
        let json = serde_json::to_string(&TaskId::new(42)).unwrap();
        assert_eq!(json, "42");

        let parsed: TaskId = serde_json::from_str("42").unwrap();
        assert_eq!(parsed, TaskId::new(42));
    }
}
