//! Shared helpers for board views

use ratatui::style::{Color, Modifier, Style};

use crate::domain::{DueState, Priority, TaskStatus};

/// Cut a string to `max_len` characters, ending in "..." when shortened
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// Checkbox-style marker for a status
pub fn status_marker(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "[ ]",
        TaskStatus::InProgress => "[~]",
        TaskStatus::Completed => "[x]",
    }
}

pub fn status_color(status: TaskStatus) -> Color {
    match status {
        TaskStatus::Pending => Color::Blue,
        TaskStatus::InProgress => Color::Yellow,
        TaskStatus::Completed => Color::Green,
    }
}

pub fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => Color::Red,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Green,
    }
}

/// Style for a due-date note: red when late, yellow when close
pub fn due_style(state: DueState) -> Style {
    match state {
        DueState::Overdue(_) => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        DueState::DueSoon(_) => Style::default().fg(Color::Yellow),
        DueState::Upcoming(_) => Style::default(),
        DueState::Done => Style::default().fg(Color::DarkGray),
    }
}
