//! JSON storage for tasks
//!
//! The whole collection lives in `.study/studentTasks.json` as one
//! pretty-printed JSON array, in insertion order. Reads take a shared lock,
//! writes go to a locked temp file that is renamed over the store.

use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

use crate::domain::{Task, TaskId};

/// Name the collection is stored under
pub const STORE_KEY: &str = "studentTasks";

/// Store for the task collection
pub struct TaskStore {
    path: PathBuf,
}

impl TaskStore {
    /// Creates a new task store at the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates the default store for a project
    pub fn for_project(project_root: &Path) -> Self {
        Self::new(
            project_root
                .join(".study")
                .join(format!("{}.json", STORE_KEY)),
        )
    }

    /// Returns the path to the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all tasks in stored order
    pub fn read_all(&self) -> Result<Vec<Task>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open task store: {}", self.path.display()))?;

        file.lock_shared()
            .context("Failed to acquire read lock on task store")?;

        if file.metadata().map(|m| m.len() == 0).unwrap_or(false) {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(&file);
        let tasks: Vec<Task> = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to parse task store: {}", self.path.display()))?;

        Ok(tasks)
    }

    /// Writes the whole collection (full rewrite)
    pub fn write_all(&self, tasks: &[Task]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let temp_path = self.path.with_extension("json.tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

            file.lock_exclusive()
                .context("Failed to acquire write lock on task store")?;

            let mut writer = BufWriter::new(&file);
            serde_json::to_writer_pretty(&mut writer, tasks)
                .context("Failed to serialize tasks")?;
            writeln!(writer).context("Failed to write task store")?;
            writer.flush().context("Failed to flush task store")?;
        }

        fs::rename(&temp_path, &self.path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                self.path.display()
            )
        })?;

        Ok(())
    }

    /// Appends a task to the end of the collection
    pub fn insert(&self, task: &Task) -> Result<()> {
        let mut tasks = self.read_all()?;
        if tasks.iter().any(|t| t.id == task.id) {
            anyhow::bail!("Task {} already exists", task.id);
        }
        tasks.push(task.clone());
        self.write_all(&tasks)
    }

    /// Replaces the task with the same ID in place. Returns false if absent.
    pub fn update(&self, task: &Task) -> Result<bool> {
        let mut tasks = self.read_all()?;
        match tasks.iter_mut().find(|t| t.id == task.id) {
            Some(slot) => {
                *slot = task.clone();
                self.write_all(&tasks)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Removes a task by ID
    pub fn remove(&self, task_id: TaskId) -> Result<bool> {
        let mut tasks = self.read_all()?;
        let before = tasks.len();
        tasks.retain(|t| t.id != task_id);
        let removed = tasks.len() != before;
        if removed {
            self.write_all(&tasks)?;
        }
        Ok(removed)
    }

    /// Removes every completed task, returning how many were dropped
    pub fn remove_completed(&self) -> Result<usize> {
        let mut tasks = self.read_all()?;
        let before = tasks.len();
        tasks.retain(|t| !t.status.is_complete());
        let removed = before - tasks.len();
        if removed > 0 {
            self.write_all(&tasks)?;
        }
        Ok(removed)
    }
}
