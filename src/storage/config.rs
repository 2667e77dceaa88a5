//! Configuration handling for the study tracker
//!
//! Configuration is stored in `.study/config.toml` (project) and
//! `~/.config/study-tracker/config.toml` (global).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::ViewConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Default list options, stored as the same strings the command line takes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ViewDefaults {
    /// dueDate, priority, subject or status
    pub sort_by: String,

    /// All, Pending, In Progress or Completed
    pub filter_status: String,

    /// All, Low, Medium or High
    pub filter_priority: String,
}

impl Default for ViewDefaults {
    fn default() -> Self {
        Self {
            sort_by: "dueDate".to_string(),
            filter_status: "All".to_string(),
            filter_priority: "All".to_string(),
        }
    }
}

impl ViewDefaults {
    /// Builds a view config, letting explicit options override the defaults
    pub fn resolve(
        &self,
        search: Option<&str>,
        status: Option<&str>,
        priority: Option<&str>,
        sort_by: Option<&str>,
    ) -> ViewConfig {
        ViewConfig::from_options(
            search.unwrap_or(""),
            status.unwrap_or(&self.filter_status),
            priority.unwrap_or(&self.filter_priority),
            sort_by.unwrap_or(&self.sort_by),
        )
    }
}

/// Project-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Default options for `study list` and the board
    pub view: ViewDefaults,

    /// Directory for `study export`, relative to the project root
    pub export_dir: Option<String>,

    /// Ask before deleting tasks
    pub confirm_destructive: bool,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            view: ViewDefaults::default(),
            export_dir: None,
            confirm_destructive: true,
        }
    }
}

/// Global user configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GlobalConfig {
    /// Default output format (text or json)
    pub default_format: OutputFormat,
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Combined configuration (global + project)
#[derive(Debug, Clone)]
pub struct Config {
    pub project: ProjectConfig,
    pub global: GlobalConfig,
    pub project_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration for a specific project
    pub fn for_project(project_root: &Path) -> Result<Self> {
        let global = Self::load_global()?;
        let project = Self::load_project_config(project_root)?;

        Ok(Self {
            project,
            global,
            project_root: Some(project_root.to_path_buf()),
        })
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "study", "study-tracker")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads global configuration
    pub fn load_global() -> Result<GlobalConfig> {
        let config_dir = match Self::global_config_dir() {
            Some(dir) => dir,
            None => return Ok(GlobalConfig::default()),
        };

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            return Ok(GlobalConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read global config: {}", config_path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse global config")
    }

    /// Loads project configuration from a specific root
    fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
        let config_path = project_root.join(".study").join("config.toml");

        if !config_path.exists() {
            return Ok(ProjectConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read project config: {}", config_path.display()))?;

        let config: ProjectConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse project config")?;

        if let Some(dir) = &config.export_dir {
            if dir.trim().is_empty() {
                return Err(ConfigError::Invalid("export_dir must not be empty".to_string()))
                    .context("Failed to load project config");
            }
        }

        Ok(config)
    }

    /// Finds the project root by looking for a `.study/` directory
    pub fn find_project_root() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        Self::find_project_root_from(&current)
    }

    /// Walks up from `start` looking for a `.study/` directory
    pub fn find_project_root_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            if current.join(".study").is_dir() {
                return Some(current);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Returns true if we're in a study project
    pub fn is_in_project(&self) -> bool {
        self.project_root.is_some()
    }

    /// Returns the project root, or an error if not in a project
    pub fn require_project_root(&self) -> Result<&Path> {
        self.project_root
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("Not in a study project. Run 'study init' first."))
    }

    /// Directory exports go to when no explicit path is given
    pub fn export_dir(&self) -> Result<PathBuf> {
        let root = self.require_project_root()?;
        Ok(match &self.project.export_dir {
            Some(dir) => root.join(dir),
            None => root.to_path_buf(),
        })
    }
}
