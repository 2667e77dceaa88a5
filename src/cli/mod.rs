//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Command Groups
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Core | Project management | `init` |
//! | Task | Work item management | `task add`, `task edit`, `task status`, `task delete` |
//! | Query | Views over the collection | `list`, `stats` |
//! | Maintenance | Bulk operations | `clear-completed`, `export` |
//! | Board | Interactive terminal UI | `board` |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output:
//! ```bash
//! study --verbose list --status Pending
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod task;
mod query;
mod export_cmd;
mod tui;

pub use app::{run, Cli, Commands};
pub use output::{Output, OutputFormat};
