//! Query commands (list, stats)
//!
//! Both load a fresh snapshot of the store and hand it to the pure view and
//! statistics functions.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use super::output::Output;
use crate::domain::{
    compute_stats, compute_view, due_state, Task, TaskStats, ViewConfig, ViewSummary, DATE_FORMAT,
};
use crate::storage::Project;

/// List tasks through the view engine
pub fn list(project: &Project, output: &Output, view: &ViewConfig, now: DateTime<Utc>) -> Result<()> {
    let tasks = project.task_store().read_all()?;
    let visible = compute_view(&tasks, view);

    output.verbose_ctx(
        "list",
        &format!("{} of {} tasks match", visible.len(), tasks.len()),
    );

    if output.is_json() {
        let items = visible
            .iter()
            .map(|t| task_json(t, now))
            .collect::<Result<Vec<_>>>()?;
        output.data(&serde_json::json!({
            "view": ViewSummary::from(view),
            "total": tasks.len(),
            "tasks": items,
        }));
    } else if tasks.is_empty() {
        println!("No tasks yet. Add your first task with 'study task add'.");
    } else if visible.is_empty() {
        println!("No tasks match your filters.");
    } else {
        println!(
            "{:<15} {:<10} {:<8} {:<11} {:<16} TITLE",
            "ID", "DUE", "PRIORITY", "STATUS", "SUBJECT"
        );
        println!("{}", "-".repeat(90));

        for task in &visible {
            println!("{}", format_row(task, now));
        }

        if view.is_filtering() {
            println!();
            println!("Showing {} of {} tasks", visible.len(), tasks.len());
        }
    }

    Ok(())
}

/// A task's stored fields plus its due state
pub(super) fn task_json(task: &Task, now: DateTime<Utc>) -> Result<serde_json::Value> {
    let mut value = serde_json::to_value(task).context("Failed to serialize task")?;
    value["due"] = serde_json::to_value(due_state(task, now))
        .context("Failed to serialize due state")?;
    Ok(value)
}

fn format_row(task: &Task, now: DateTime<Utc>) -> String {
    let mut row = format!(
        "{:<15} {:<10} {:<8} {:<11} {:<16} {}",
        task.id,
        task.due_date.format(DATE_FORMAT),
        task.priority,
        task.status,
        task.subject,
        task.title
    );

    if let Some(note) = due_state(task, now).describe() {
        row.push_str(&format!("  [{}]", note));
    }
    if !task.tags.is_empty() {
        row.push_str(&format!("  #{}", task.tags.join(" #")));
    }

    row
}

/// Show summary counts for the whole collection
pub fn stats(project: &Project, output: &Output, now: DateTime<Utc>) -> Result<()> {
    let tasks = project.task_store().read_all()?;
    let stats = compute_stats(&tasks, now);

    if output.is_json() {
        output.data(&stats);
    } else {
        print_stats(&stats);
    }

    Ok(())
}

fn print_stats(stats: &TaskStats) {
    println!("Task Summary");
    println!("{}", "=".repeat(30));
    println!("Total:        {}", stats.total);
    println!("  Pending:     {}", stats.pending);
    println!("  In Progress: {}", stats.in_progress);
    println!("  Completed:   {}", stats.completed);
    println!("Overdue:      {}", stats.overdue);
}
