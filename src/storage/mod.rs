//! # Storage Layer
//!
//! Persistence for the study tracker in plain, hand-editable files.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Tasks | JSON array | `.study/studentTasks.json` |
//! | Config | TOML | `.study/config.toml` |
//! | Exports | JSON array | `student-tasks-YYYY-MM-DD.json` |
//!
//! ## Concurrency Safety
//!
//! - [`TaskStore`] uses file locking (`fs2`) around reads and writes
//! - All writes are atomic (temp file + rename)
//!
//! ## Project Structure
//!
//! ```text
//! .study/
//! ├── studentTasks.json     # All tasks, insertion order
//! ├── config.toml           # Project configuration
//! └── .gitignore
//! ```

mod store;
mod export;
mod config;
mod project;

pub use store::{TaskStore, STORE_KEY};
pub use export::{export_file_name, export_path, write_export};
pub use config::{Config, ConfigError, GlobalConfig, OutputFormat, ProjectConfig, ViewDefaults};
pub use project::{Project, ProjectError};
