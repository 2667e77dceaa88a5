//! Project management
//!
//! Handles project initialization and provides access to the task store.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use super::{Config, TaskStore};

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Not in a study project. Run 'study init' first.")]
    NotInProject,
}

/// A study tracker project
pub struct Project {
    root: PathBuf,
    config: Config,
}

impl Project {
    /// Opens an existing project at the given path
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();

        if !root.join(".study").is_dir() {
            return Err(ProjectError::NotInProject.into());
        }

        let config = Config::for_project(&root)?;

        Ok(Self { root, config })
    }

    /// Opens the project at the current directory or a parent
    pub fn open_current() -> Result<Self> {
        let root = Config::find_project_root().ok_or(ProjectError::NotInProject)?;

        Self::open(root)
    }

    /// Opens the project containing `start`, or the current directory's
    /// project when no start is given
    pub fn discover(start: Option<&Path>) -> Result<Self> {
        match start {
            Some(path) => {
                let root =
                    Config::find_project_root_from(path).ok_or(ProjectError::NotInProject)?;
                Self::open(root)
            }
            None => Self::open_current(),
        }
    }

    /// Initializes a new project at the given path
    pub fn init(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let study_dir = root.join(".study");

        fs::create_dir_all(&study_dir).with_context(|| {
            format!("Failed to create .study directory: {}", study_dir.display())
        })?;

        let config_path = study_dir.join("config.toml");
        if !config_path.exists() {
            let default_config = r#"# Study tracker configuration

# Ask before deleting tasks
confirm_destructive = true

# Directory for 'study export' (relative to the project root)
# export_dir = "exports"

[view]
# dueDate, priority, subject or status
sort_by = "dueDate"
# All, Pending, In Progress or Completed
filter_status = "All"
# All, Low, Medium or High
filter_priority = "All"
"#;
            fs::write(&config_path, default_config)
                .with_context(|| format!("Failed to write config: {}", config_path.display()))?;
        }

        let gitignore_path = study_dir.join(".gitignore");
        if !gitignore_path.exists() {
            let gitignore = r#"# Ignore interrupted writes
*.tmp
"#;
            fs::write(&gitignore_path, gitignore).with_context(|| {
                format!("Failed to write .gitignore: {}", gitignore_path.display())
            })?;
        }

        Self::open(root)
    }

    /// Returns the project root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the .study directory path
    pub fn study_dir(&self) -> PathBuf {
        self.root.join(".study")
    }

    /// Returns the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the task store
    pub fn task_store(&self) -> TaskStore {
        TaskStore::for_project(&self.root)
    }
}
