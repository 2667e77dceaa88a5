//! Main CLI application structure

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{export_cmd, query, task, tui};
use crate::domain::DATE_FORMAT;
use crate::storage::{Config, Project};

#[derive(Parser)]
#[command(name = "study")]
#[command(author, version, about = "Local-first coursework tracker for students")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the global config, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Project directory (defaults to the nearest parent with a .study directory)
    #[arg(long, short = 'C', global = true, env = "STUDY_PROJECT")]
    pub project: Option<PathBuf>,

    /// Evaluate due dates as of this moment (RFC 3339 or YYYY-MM-DD)
    #[arg(long, global = true, env = "STUDY_NOW", hide = true)]
    pub now: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new study project
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,
    },

    /// Manage tasks
    #[command(subcommand)]
    Task(task::TaskCommands),

    /// List tasks with search, filters and sorting
    List {
        /// Case-insensitive text matched against title, subject and notes
        #[arg(long, short)]
        search: Option<String>,

        /// Status filter: All, Pending, "In Progress" or Completed
        #[arg(long)]
        status: Option<String>,

        /// Priority filter: All, Low, Medium or High
        #[arg(long)]
        priority: Option<String>,

        /// Sort key: dueDate, priority, subject or status
        #[arg(long)]
        sort: Option<String>,
    },

    /// Show task counts for the whole collection
    Stats,

    /// Delete every completed task
    ClearCompleted {
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// Export all tasks to a JSON file
    Export {
        /// Output file (defaults to student-tasks-YYYY-MM-DD.json in the export directory)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Open the interactive task board
    Board {
        /// Initial view: cards or columns
        #[arg(long, default_value = "cards")]
        view: String,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let format = match cli.format {
        Some(format) => format,
        None => Config::load_global()
            .map(|global| global.default_format.into())
            .unwrap_or_default(),
    };
    let output = Output::new(format, cli.verbose);

    output.verbose("Study tracker starting");

    if let Err(e) = dispatch(cli, &output) {
        if output.is_json() {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
        return Err(e);
    }

    output.verbose("Command completed successfully");
    Ok(())
}

fn dispatch(cli: Cli, output: &Output) -> Result<()> {
    let now = resolve_now(cli.now.as_deref())?;
    output.verbose_ctx("clock", &format!("Evaluating due dates at {}", now.to_rfc3339()));

    let project_dir = cli.project.as_deref();
    let open_project = || -> Result<Project> {
        let project = Project::discover(project_dir)?;
        output.verbose(&format!("Opened project at: {}", project.root().display()));
        Ok(project)
    };

    match cli.command {
        Commands::Init { path } => {
            let target = match project_dir {
                Some(dir) if path == "." => dir.to_path_buf(),
                _ => PathBuf::from(path),
            };
            output.verbose_ctx("init", &format!("Initializing project at: {}", target.display()));
            let project = Project::init(&target)?;
            output.verbose_ctx(
                "init",
                &format!("Created .study directory at: {}", project.study_dir().display()),
            );
            output.success(&format!(
                "Initialized study project at {}",
                project.root().display()
            ));
        }

        Commands::Task(cmd) => task::run(cmd, &open_project()?, output, now)?,

        Commands::List { search, status, priority, sort } => {
            let project = open_project()?;
            let view = project.config().project.view.resolve(
                search.as_deref(),
                status.as_deref(),
                priority.as_deref(),
                sort.as_deref(),
            );
            output.verbose_ctx("list", &format!("View options: {:?}", view));
            query::list(&project, output, &view, now)?
        }

        Commands::Stats => query::stats(&open_project()?, output, now)?,

        Commands::ClearCompleted { yes } => task::clear_completed(&open_project()?, output, yes)?,

        Commands::Export { output: path } => {
            export_cmd::export(&open_project()?, output, path.as_deref(), now.date_naive())?
        }

        Commands::Board { view } => tui::run(&open_project()?, output, &view)?,
    }

    Ok(())
}

/// Parses the `--now` override, defaulting to the wall clock
fn resolve_now(raw: Option<&str>) -> Result<DateTime<Utc>> {
    let Some(raw) = raw else {
        return Ok(Utc::now());
    };

    if let Ok(moment) = DateTime::parse_from_rfc3339(raw) {
        return Ok(moment.with_timezone(&Utc));
    }

    let day = NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .with_context(|| format!("Invalid --now value '{}': expected RFC 3339 or YYYY-MM-DD", raw))?;
    Ok(day.and_time(chrono::NaiveTime::MIN).and_utc())
}
