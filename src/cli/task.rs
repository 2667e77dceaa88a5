//! Task CLI commands

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Subcommand;

use super::output::Output;
use super::query;
use crate::domain::{
    due_state, parse_due_date, parse_tags, Priority, Task, TaskDraft, TaskEdit, TaskId,
    TaskStatus,
};
use crate::storage::{Project, TaskStore};

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Add a task
    ///
    /// Examples:
    ///   study task add Mathematics "Chapter 5 exercises" --due 2025-03-10
    ///   study task add History "Essay draft" --due 2025-03-01 --priority high --tags "essay, ww2"
    Add {
        /// Subject or course
        subject: String,

        /// Task title
        title: String,

        /// Due date (YYYY-MM-DD)
        #[arg(long, short)]
        due: String,

        /// Low, Medium or High
        #[arg(long, short, default_value = "Medium")]
        priority: String,

        /// Pending, "In Progress" or Completed
        #[arg(long, default_value = "Pending")]
        status: String,

        /// Free-form notes
        #[arg(long, short)]
        notes: Option<String>,

        /// Comma-separated tags
        #[arg(long, short)]
        tags: Option<String>,
    },

    /// Show task details
    Show {
        /// Task ID
        id: String,
    },

    /// Edit any field of a task
    Edit {
        /// Task ID
        id: String,

        #[arg(long)]
        subject: Option<String>,

        #[arg(long)]
        title: Option<String>,

        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,

        #[arg(long)]
        priority: Option<String>,

        #[arg(long)]
        status: Option<String>,

        /// New notes (empty string clears them)
        #[arg(long)]
        notes: Option<String>,

        /// Comma-separated tags, replacing the current ones
        #[arg(long)]
        tags: Option<String>,
    },

    /// Change a task's status
    Status {
        /// Task ID
        id: String,

        /// Pending, "In Progress" or Completed
        status: String,
    },

    /// Delete a task
    Delete {
        /// Task ID
        id: String,

        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

pub fn run(cmd: TaskCommands, project: &Project, output: &Output, now: DateTime<Utc>) -> Result<()> {
    match cmd {
        TaskCommands::Add { subject, title, due, priority, status, notes, tags } => {
            let draft = TaskDraft::new(subject, title, parse_due_date(&due)?)
                .with_priority(priority.parse()?)
                .with_status(status.parse()?)
                .with_tags(tags.as_deref().map(parse_tags).unwrap_or_default());
            let draft = match notes {
                Some(notes) => draft.with_notes(notes),
                None => draft,
            };
            add_task(project, output, draft, now)
        }
        TaskCommands::Show { id } => show_task(project, output, &id, now),
        TaskCommands::Edit { id, subject, title, due, priority, status, notes, tags } => {
            let edit = TaskEdit {
                subject,
                title,
                due_date: due.as_deref().map(parse_due_date).transpose()?,
                priority: priority.as_deref().map(str::parse::<Priority>).transpose()?,
                status: status.as_deref().map(str::parse::<TaskStatus>).transpose()?,
                notes,
                tags: tags.as_deref().map(parse_tags),
            };
            edit_task(project, output, &id, edit)
        }
        TaskCommands::Status { id, status } => set_status(project, output, &id, status.parse()?),
        TaskCommands::Delete { id, yes } => delete_task(project, output, &id, yes),
    }
}

fn find_task(tasks: &[Task], id_str: &str) -> Result<(TaskId, usize)> {
    let id: TaskId = id_str.parse()?;
    let index = tasks
        .iter()
        .position(|t| t.id == id)
        .ok_or_else(|| anyhow::anyhow!("Task not found: {}", id))?;
    Ok((id, index))
}

fn add_task(project: &Project, output: &Output, draft: TaskDraft, now: DateTime<Utc>) -> Result<()> {
    let store = project.task_store();
    let tasks = store.read_all()?;

    let id = TaskId::next(tasks.iter().map(|t| &t.id), now)?;
    output.verbose_ctx("add", &format!("Allocated task ID {}", id));

    let task = draft.into_task(id, now)?;
    store.insert(&task)?;

    if output.is_json() {
        output.data(&task);
    } else {
        output.success(&format!(
            "Created task: {} - {} ({})",
            task.id, task.title, task.subject
        ));
    }

    Ok(())
}

fn show_task(project: &Project, output: &Output, id_str: &str, now: DateTime<Utc>) -> Result<()> {
    let tasks = project.task_store().read_all()?;
    let (_, index) = find_task(&tasks, id_str)?;
    let task = &tasks[index];
    let due = due_state(task, now);

    if output.is_json() {
        output.data(&query::task_json(task, now)?);
    } else {
        println!("Task: {}", task.id);
        println!("Title: {}", task.title);
        println!("Subject: {}", task.subject);
        println!("Status: {}", task.status);
        println!("Priority: {}", task.priority);
        println!("Due: {}", task.due_date.format("%b %-d, %Y"));
        if let Some(note) = due.describe() {
            println!("      {}", note);
        }
        println!("Created: {}", task.created_at.format("%Y-%m-%d %H:%M"));

        if !task.tags.is_empty() {
            println!("Tags: {}", task.tags.join(", "));
        }

        if let Some(notes) = task.notes() {
            println!("\nNotes:");
            println!("{}", notes);
        }
    }

    Ok(())
}

fn edit_task(project: &Project, output: &Output, id_str: &str, edit: TaskEdit) -> Result<()> {
    if edit.is_empty() {
        anyhow::bail!("Nothing to change. Pass at least one field option.");
    }

    let store = project.task_store();
    let mut tasks = store.read_all()?;
    let (id, index) = find_task(&tasks, id_str)?;

    let task = &mut tasks[index];
    task.apply(edit)?;
    save_existing(&store, task)?;

    if output.is_json() {
        output.data(&*task);
    } else {
        output.success(&format!("Updated task: {}", id));
    }

    Ok(())
}

fn set_status(project: &Project, output: &Output, id_str: &str, status: TaskStatus) -> Result<()> {
    let store = project.task_store();
    let mut tasks = store.read_all()?;
    let (id, index) = find_task(&tasks, id_str)?;

    let task = &mut tasks[index];
    task.set_status(status);
    save_existing(&store, task)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "id": id,
            "status": task.status,
        }));
    } else {
        output.success(&format!("Task {} is now {}", id, task.status));
    }

    Ok(())
}

fn delete_task(project: &Project, output: &Output, id_str: &str, yes: bool) -> Result<()> {
    let store = project.task_store();
    let tasks = store.read_all()?;
    let (id, index) = find_task(&tasks, id_str)?;

    if needs_confirmation(project, yes)
        && !output.confirm(&format!(
            "Delete task {} ({})?",
            id, tasks[index].title
        ))?
    {
        output.success("Cancelled");
        return Ok(());
    }

    store.remove(id)?;

    if output.is_json() {
        output.data(&serde_json::json!({ "deleted": id }));
    } else {
        output.success(&format!("Deleted task: {}", id));
    }

    Ok(())
}

/// Removes every completed task from the collection
pub fn clear_completed(project: &Project, output: &Output, yes: bool) -> Result<()> {
    let store = project.task_store();
    let completed = store
        .read_all()?
        .iter()
        .filter(|t| t.status.is_complete())
        .count();

    if completed == 0 {
        if output.is_json() {
            output.data(&serde_json::json!({ "removed": 0 }));
        } else {
            println!("No completed tasks");
        }
        return Ok(());
    }

    if needs_confirmation(project, yes)
        && !output.confirm(&format!("Delete all {} completed task(s)?", completed))?
    {
        output.success("Cancelled");
        return Ok(());
    }

    let removed = store.remove_completed()?;
    output.verbose_ctx("clear", &format!("Removed {} task(s)", removed));

    if output.is_json() {
        output.data(&serde_json::json!({ "removed": removed }));
    } else {
        output.success(&format!("Removed {} completed task(s)", removed));
    }

    Ok(())
}

/// Writes back a task read earlier, failing if it was removed in between
fn save_existing(store: &TaskStore, task: &Task) -> Result<()> {
    if !store.update(task)? {
        anyhow::bail!("Task {} no longer exists; it was removed while editing", task.id);
    }
    Ok(())
}

fn needs_confirmation(project: &Project, yes: bool) -> bool {
    !yes && project.config().project.confirm_destructive
}
