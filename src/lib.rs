//! Study Tracker - A local-first task tracker for student coursework
//!
//! Tasks carry a subject, title, due date, priority and status. The
//! [`domain`] module turns a task snapshot into a filtered, sorted view and
//! summary statistics; [`storage`] keeps the collection on disk and [`cli`]
//! exposes both as a command-line tool with a terminal board.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{
    compute_stats, compute_view, Priority, Task, TaskId, TaskStats, TaskStatus, ViewConfig,
};
