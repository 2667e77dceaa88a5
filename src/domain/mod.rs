//! Domain models for the study tracker
//!
//! Contains the core business logic without any I/O concerns. The view
//! engine, statistics and due-date helpers are pure functions over a task
//! snapshot; anything time-dependent takes "now" as a parameter.

mod id;
mod task;
mod due;
mod view;
mod stats;

pub use id::{IdError, TaskId};
pub use task::{
    parse_due_date, parse_tags, Priority, Task, TaskDraft, TaskEdit, TaskError, TaskStatus,
    DATE_FORMAT,
};
pub use due::{days_until_due, due_state, is_due_soon, is_overdue, DueState, DUE_SOON_DAYS};
pub use view::{compute_view, PriorityFilter, SortKey, StatusFilter, ViewConfig, ViewSummary};
pub use stats::{compute_stats, TaskStats};
