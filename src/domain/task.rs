//! Task domain model
//!
//! A task is one trackable unit of student work. Tasks are created from a
//! validated [`TaskDraft`], edited through a [`TaskEdit`], and otherwise only
//! read by the view and statistics code.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::id::TaskId;

/// Date format used for due dates on disk and on the command line
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error, PartialEq)]
pub enum TaskError {
    #[error("Required field is empty: {0}")]
    EmptyField(&'static str),

    #[error("Invalid due date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid priority '{0}': expected Low, Medium or High")]
    InvalidPriority(String),

    #[error("Invalid status '{0}': expected Pending, In Progress or Completed")]
    InvalidStatus(String),
}

/// Status of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TaskStatus {
    #[default]
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl TaskStatus {
    /// All statuses in workflow order
    pub const ALL: [TaskStatus; 3] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
    ];

    /// Returns the display label (also the serialized form)
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
        }
    }

    /// Returns true if this status represents completion
    pub fn is_complete(&self) -> bool {
        matches!(self, TaskStatus::Completed)
    }

    /// Next status in the workflow, wrapping back to Pending
    pub fn next(&self) -> Self {
        match self {
            TaskStatus::Pending => TaskStatus::InProgress,
            TaskStatus::InProgress => TaskStatus::Completed,
            TaskStatus::Completed => TaskStatus::Pending,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TaskStatus {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "pending" | "todo" => Ok(TaskStatus::Pending),
            "inprogress" => Ok(TaskStatus::InProgress),
            "completed" | "done" => Ok(TaskStatus::Completed),
            _ => Err(TaskError::InvalidStatus(s.to_string())),
        }
    }
}

/// Priority of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Sort rank, higher is more urgent
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Priority {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => Err(TaskError::InvalidPriority(s.to_string())),
        }
    }
}

/// Parses a `YYYY-MM-DD` due date
pub fn parse_due_date(s: &str) -> Result<NaiveDate, TaskError> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| TaskError::InvalidDate(s.to_string()))
}

/// Splits a comma-separated tag list, dropping blanks
pub fn parse_tags(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Normalizes optional notes: blank text means no notes
fn normalize_notes(notes: Option<String>) -> Option<String> {
    notes.filter(|n| !n.trim().is_empty())
}

/// A unit of student work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier
    pub id: TaskId,

    /// Course or subject label
    pub subject: String,

    /// Human-readable title
    pub title: String,

    /// Calendar due date
    pub due_date: NaiveDate,

    pub priority: Priority,

    pub status: TaskStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    /// When the task was created; never changes afterwards
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Returns true if the (already lowercased) query occurs in the title,
    /// subject or notes
    pub fn matches_query(&self, query_lower: &str) -> bool {
        self.title.to_lowercase().contains(query_lower)
            || self.subject.to_lowercase().contains(query_lower)
            || self
                .notes
                .as_ref()
                .is_some_and(|n| n.to_lowercase().contains(query_lower))
    }

    /// Notes for display; blank notes from older data count as none
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref().filter(|n| !n.trim().is_empty())
    }

    /// Changes the status only
    pub fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
    }

    /// Applies a full edit. The task is left untouched if the result would
    /// be invalid.
    pub fn apply(&mut self, edit: TaskEdit) -> Result<(), TaskError> {
        let mut updated = self.clone();

        if let Some(subject) = edit.subject {
            updated.subject = subject.trim().to_string();
        }
        if let Some(title) = edit.title {
            updated.title = title.trim().to_string();
        }
        if let Some(due_date) = edit.due_date {
            updated.due_date = due_date;
        }
        if let Some(priority) = edit.priority {
            updated.priority = priority;
        }
        if let Some(status) = edit.status {
            updated.status = status;
        }
        if let Some(notes) = edit.notes {
            updated.notes = normalize_notes(Some(notes));
        }
        if let Some(tags) = edit.tags {
            updated.tags = tags;
        }

        validate_required(&updated.subject, &updated.title)?;
        *self = updated;
        Ok(())
    }
}

fn validate_required(subject: &str, title: &str) -> Result<(), TaskError> {
    if subject.trim().is_empty() {
        return Err(TaskError::EmptyField("subject"));
    }
    if title.trim().is_empty() {
        return Err(TaskError::EmptyField("title"));
    }
    Ok(())
}

/// Input for creating a task
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDraft {
    pub subject: String,
    pub title: String,
    pub due_date: NaiveDate,
    pub priority: Priority,
    pub status: TaskStatus,
    pub notes: Option<String>,
    pub tags: Vec<String>,
}

impl TaskDraft {
    /// Creates a draft with default priority (Medium) and status (Pending)
    pub fn new(subject: impl Into<String>, title: impl Into<String>, due_date: NaiveDate) -> Self {
        Self {
            subject: subject.into(),
            title: title.into(),
            due_date,
            priority: Priority::default(),
            status: TaskStatus::default(),
            notes: None,
            tags: Vec::new(),
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    /// Validates the draft and turns it into a task with the given identity
    pub fn into_task(self, id: TaskId, created_at: DateTime<Utc>) -> Result<Task, TaskError> {
        validate_required(&self.subject, &self.title)?;

        Ok(Task {
            id,
            subject: self.subject.trim().to_string(),
            title: self.title.trim().to_string(),
            due_date: self.due_date,
            priority: self.priority,
            status: self.status,
            notes: normalize_notes(self.notes),
            tags: self
                .tags
                .into_iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
            created_at,
        })
    }
}

/// A full edit of an existing task. `None` leaves a field unchanged;
/// `notes: Some("")` clears the notes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskEdit {
    pub subject: Option<String>,
    pub title: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<Priority>,
    pub status: Option<TaskStatus>,
    pub notes: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl TaskEdit {
    /// Returns true if the edit changes nothing
    pub fn is_empty(&self) -> bool {
        *self == TaskEdit::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(s: &str) -> NaiveDate {
        parse_due_date(s).unwrap()
    }

    fn make_task() -> Task {
        TaskDraft::new("Mathematics", "Chapter 5 exercises", date("2025-03-10"))
            .into_task(TaskId::new(1), Utc::now())
            .unwrap()
    }

    #[test]
    fn new_task_has_defaults() {
        let task = make_task();
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.priority, Priority::Medium);
        assert!(task.notes.is_none());
        assert!(task.tags.is_empty());
    }

    #[test]
    fn draft_rejects_empty_required_fields() {
        let due = date("2025-03-10");
        let created = Utc::now();

        let err = TaskDraft::new("  ", "Essay", due)
            .into_task(TaskId::new(1), created)
            .unwrap_err();
        assert_eq!(err, TaskError::EmptyField("subject"));

        let err = TaskDraft::new("History", "", due)
            .into_task(TaskId::new(1), created)
            .unwrap_err();
        assert_eq!(err, TaskError::EmptyField("title"));
    }

    #[test]
    fn draft_normalizes_notes_and_tags() {
        let task = TaskDraft::new("Physics", "Lab report", date("2025-04-01"))
            .with_notes("   ")
            .with_tags(vec!["lab".into(), " ".into(), " group ".into()])
            .into_task(TaskId::new(7), Utc::now())
            .unwrap();

        assert!(task.notes.is_none());
        assert_eq!(task.tags, vec!["lab", "group"]);
    }

    #[test]
    fn status_parsing_accepts_label_variants() {
        assert_eq!("Pending".parse::<TaskStatus>().unwrap(), TaskStatus::Pending);
        assert_eq!("In Progress".parse::<TaskStatus>().unwrap(), TaskStatus::InProgress);
        assert_eq!("in_progress".parse::<TaskStatus>().unwrap(), TaskStatus::InProgress);
        assert_eq!("in-progress".parse::<TaskStatus>().unwrap(), TaskStatus::InProgress);
        assert_eq!("DONE".parse::<TaskStatus>().unwrap(), TaskStatus::Completed);
        assert!("finished".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn priority_parsing_and_rank() {
        assert_eq!("high".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!(" Low ".parse::<Priority>().unwrap(), Priority::Low);
        assert!("urgent".parse::<Priority>().is_err());

        assert!(Priority::High.rank() > Priority::Medium.rank());
        assert!(Priority::Medium.rank() > Priority::Low.rank());
    }

    #[test]
    fn status_cycles_through_workflow() {
        let start = TaskStatus::Pending;
        assert_eq!(start.next(), TaskStatus::InProgress);
        assert_eq!(start.next().next(), TaskStatus::Completed);
        assert_eq!(start.next().next().next(), start);
    }

    #[test]
    fn parse_tags_splits_and_trims() {
        assert_eq!(parse_tags("exam, reading ,, final"), vec!["exam", "reading", "final"]);
        assert!(parse_tags("").is_empty());
        assert!(parse_tags(" , ").is_empty());
    }

    #[test]
    fn parse_due_date_rejects_garbage() {
        assert!(parse_due_date("2025-13-01").is_err());
        assert!(parse_due_date("tomorrow").is_err());
        assert_eq!(parse_due_date(" 2025-01-31 ").unwrap(), date("2025-01-31"));
    }

    #[test]
    fn matches_query_checks_title_subject_and_notes() {
        let mut task = make_task();
        assert!(task.matches_query("math"));
        assert!(task.matches_query("chapter"));
        assert!(!task.matches_query("integrals"));

        task.notes = Some("Focus on Integrals".to_string());
        assert!(task.matches_query("integrals"));
    }

    #[test]
    fn apply_edit_preserves_identity() {
        let mut task = make_task();
        let id = task.id;
        let created = task.created_at;

        task.apply(TaskEdit {
            title: Some("Chapter 6 exercises".into()),
            priority: Some(Priority::High),
            notes: Some("odd numbers only".into()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(task.id, id);
        assert_eq!(task.created_at, created);
        assert_eq!(task.title, "Chapter 6 exercises");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.notes.as_deref(), Some("odd numbers only"));
    }

    #[test]
    fn apply_edit_can_clear_notes() {
        let mut task = make_task();
        task.notes = Some("old".into());

        task.apply(TaskEdit {
            notes: Some(String::new()),
            ..Default::default()
        })
        .unwrap();

        assert!(task.notes.is_none());
    }

    #[test]
    fn invalid_edit_leaves_task_unchanged() {
        let mut task = make_task();
        let before = task.clone();

        let result = task.apply(TaskEdit {
            subject: Some(" ".into()),
            priority: Some(Priority::Low),
            ..Default::default()
        });

        assert_eq!(result, Err(TaskError::EmptyField("subject")));
        assert_eq!(task, before);
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let created = Utc.with_ymd_and_hms(2025, 1, 14, 9, 30, 0).unwrap();
        let task = TaskDraft::new("Chemistry", "Titration lab", date("2025-01-20"))
            .with_status(TaskStatus::InProgress)
            .with_priority(Priority::High)
            .into_task(TaskId::new(1736847000000), created)
            .unwrap();

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["id"], 1736847000000_i64);
        assert_eq!(json["dueDate"], "2025-01-20");
        assert_eq!(json["status"], "In Progress");
        assert_eq!(json["priority"], "High");
        assert_eq!(json["tags"], serde_json::json!([]));
        assert!(json.get("notes").is_none());
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn deserializes_record_without_tags() {
        let json = r#"{
            "id": 1700000000000,
            "subject": "Biology",
            "title": "Cell diagram",
            "dueDate": "2024-11-20",
            "priority": "Low",
            "status": "Completed",
            "notes": "",
            "createdAt": "2023-11-14T22:13:20.000Z"
        }"#;

        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.status, TaskStatus::Completed);
        assert!(task.tags.is_empty());
        assert_eq!(task.notes.as_deref(), Some(""));
    }
}
