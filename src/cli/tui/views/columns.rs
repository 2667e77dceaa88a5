//! Columns view: visible tasks grouped by status

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem},
};

use super::{draw_stats_bar, draw_status_bar, frame_layout};
use crate::cli::tui::app::App;
use crate::cli::tui::utils::{due_style, status_color, status_marker, truncate_str};
use crate::domain::{due_state, Task, TaskStatus};

pub fn draw(frame: &mut Frame, app: &App) {
    let (stats_area, content, status_area) = frame_layout(frame.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(34),
            Constraint::Percentage(33),
        ])
        .split(content);

    let visible = app.visible_tasks();
    let selected = app.selected_task().map(|t| t.id);

    draw_stats_bar(frame, app, stats_area);
    for (status, area) in TaskStatus::ALL.into_iter().zip(columns.iter()) {
        // View order is kept within each column
        let tasks: Vec<&Task> = visible.iter().copied().filter(|t| t.status == status).collect();
        draw_column(frame, app, status, &tasks, selected, *area);
    }
    draw_status_bar(frame, app, status_area);
}

fn draw_column(
    frame: &mut Frame,
    app: &App,
    status: TaskStatus,
    tasks: &[&Task],
    selected: Option<crate::domain::TaskId>,
    area: Rect,
) {
    let color = status_color(status);
    let width = area.width.saturating_sub(8) as usize;

    let items: Vec<ListItem> = tasks
        .iter()
        .map(|task| {
            let state = due_state(task, app.now());
            let mut style = due_style(state);
            if Some(task.id) == selected {
                style = style.bg(Color::DarkGray).add_modifier(Modifier::BOLD);
            }
            let text = format!(
                "{} {}: {}",
                status_marker(task.status),
                task.subject,
                task.title
            );
            ListItem::new(truncate_str(&text, width)).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(format!("{} ({})", status, tasks.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    );

    frame.render_widget(list, area);
}
