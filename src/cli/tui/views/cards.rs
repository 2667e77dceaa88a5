//! Cards view: one entry per task in view order, plus a details pane

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use super::{draw_stats_bar, draw_status_bar, frame_layout};
use crate::cli::tui::app::App;
use crate::cli::tui::utils::{due_style, priority_color, status_color, status_marker, truncate_str};
use crate::domain::{due_state, DATE_FORMAT};

pub fn draw(frame: &mut Frame, app: &App) {
    let (stats_area, content, status_area) = frame_layout(frame.area());

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(content);

    draw_stats_bar(frame, app, stats_area);
    draw_card_list(frame, app, panes[0]);
    draw_details(frame, app, panes[1]);
    draw_status_bar(frame, app, status_area);
}

fn draw_card_list(frame: &mut Frame, app: &App, area: Rect) {
    let tasks = app.visible_tasks();
    let now = app.now();

    let items: Vec<ListItem> = tasks
        .iter()
        .map(|task| {
            let state = due_state(task, now);
            let header = Line::from(vec![
                Span::styled(
                    format!("{} ", status_marker(task.status)),
                    Style::default().fg(status_color(task.status)),
                ),
                Span::styled(
                    truncate_str(&task.subject, 16),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::styled(task.priority.label(), Style::default().fg(priority_color(task.priority))),
            ]);

            let mut detail = vec![
                Span::raw(format!("    {}  ", truncate_str(&task.title, 36))),
                Span::styled(task.due_date.format(DATE_FORMAT).to_string(), due_style(state)),
            ];
            if let Some(note) = state.describe() {
                detail.push(Span::styled(format!("  {}", note), due_style(state)));
            }

            ListItem::new(vec![header, Line::from(detail)])
        })
        .collect();

    let title = if app.view().is_filtering() {
        format!("Tasks ({} of {})", tasks.len(), app.total())
    } else {
        format!("Tasks ({})", tasks.len())
    };

    let empty = items.is_empty();
    let list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    if empty {
        let msg = if app.total() == 0 {
            "No tasks yet. Add one with 'study task add'."
        } else {
            "No tasks match your filters."
        };
        let paragraph = Paragraph::new(msg).block(
            Block::default()
                .title("Tasks")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
        frame.render_widget(paragraph, area);
        return;
    }

    let mut state = ListState::default();
    state.select(Some(app.selected_index()));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_details(frame: &mut Frame, app: &App, area: Rect) {
    let content = match app.selected_task() {
        Some(task) => {
            let state = due_state(task, app.now());
            let mut lines = vec![
                format!("Task: {}", task.id),
                format!("Title: {}", task.title),
                format!("Subject: {}", task.subject),
                format!("Status: {}", task.status),
                format!("Priority: {}", task.priority),
                format!("Due: {}", task.due_date.format("%b %-d, %Y")),
            ];
            if let Some(note) = state.describe() {
                lines.push(format!("     {}", note));
            }
            if !task.tags.is_empty() {
                lines.push(format!("Tags: {}", task.tags.join(", ")));
            }
            if let Some(notes) = task.notes() {
                lines.push(String::new());
                lines.push(notes.to_string());
            }
            lines.join("\n")
        }
        None => "No task selected".to_string(),
    };

    let paragraph = Paragraph::new(content)
        .block(Block::default().title("Details").borders(Borders::ALL))
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}
