//! Export command

use std::path::Path;

use anyhow::Result;
use chrono::NaiveDate;

use super::output::Output;
use crate::storage::{export_path, write_export, Project};

/// Writes the full collection to a JSON file
pub fn export(project: &Project, output: &Output, explicit: Option<&Path>, today: NaiveDate) -> Result<()> {
    let tasks = project.task_store().read_all()?;
    let dir = project.config().export_dir()?;
    let path = export_path(explicit, &dir, today);

    output.verbose_ctx("export", &format!("Writing {} tasks to {}", tasks.len(), path.display()));
    write_export(&tasks, &path)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "path": path.display().to_string(),
            "count": tasks.len(),
        }));
    } else {
        output.success(&format!("Exported {} task(s) to {}", tasks.len(), path.display()));
    }

    Ok(())
}
