//! JSON export of the task collection

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::domain::Task;

/// Default export file name for a given day
pub fn export_file_name(day: NaiveDate) -> String {
    format!("student-tasks-{}.json", day.format("%Y-%m-%d"))
}

/// Resolves where an export goes: an explicit path wins, otherwise the
/// dated file name inside `dir`
pub fn export_path(explicit: Option<&Path>, dir: &Path, day: NaiveDate) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => dir.join(export_file_name(day)),
    }
}

/// Writes the full collection as a pretty-printed JSON array
pub fn write_export(tasks: &[Task], path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let content = serde_json::to_string_pretty(tasks).context("Failed to serialize tasks")?;
    fs::write(path, content)
        .with_context(|| format!("Failed to write export: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TaskDraft, TaskId};
    use chrono::Utc;
    use tempfile::TempDir;

    #[test]
    fn file_name_carries_date() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(export_file_name(day), "student-tasks-2025-03-07.json");
    }

    #[test]
    fn explicit_path_wins() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        let explicit = Path::new("/tmp/out.json");
        assert_eq!(export_path(Some(explicit), Path::new("exports"), day), explicit);
        assert_eq!(
            export_path(None, Path::new("exports"), day),
            Path::new("exports").join("student-tasks-2025-03-07.json")
        );
    }

    #[test]
    fn export_writes_json_array() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out").join("tasks.json");

        let task = TaskDraft::new("Music", "Scales", NaiveDate::from_ymd_opt(2025, 4, 2).unwrap())
            .into_task(TaskId::new(5), Utc::now())
            .unwrap();
        write_export(&[task.clone()], &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let parsed: Vec<Task> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, vec![task]);
        assert!(content.contains("\n  {"));
    }
}
