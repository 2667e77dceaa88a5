//! Board layouts

pub mod cards;
pub mod columns;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use super::app::{App, ConfirmAction, InputMode};
use super::ViewMode;

/// One-line counts for the whole collection
pub fn draw_stats_bar(frame: &mut Frame, app: &App, area: Rect) {
    let stats = app.stats();
    let line = Line::from(vec![
        Span::raw(format!(" Total {}  ", stats.total)),
        Span::styled(format!("Pending {}  ", stats.pending), Style::default().fg(Color::Blue)),
        Span::styled(
            format!("In Progress {}  ", stats.in_progress),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(
            format!("Completed {}  ", stats.completed),
            Style::default().fg(Color::Green),
        ),
        Span::styled(
            format!("Overdue {}", stats.overdue),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
    ]);

    let paragraph = Paragraph::new(line).block(Block::default().borders(Borders::ALL).title("Study Tracker"));
    frame.render_widget(paragraph, area);
}

/// Bottom bar: prompt, confirmation or current view options
pub fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (content, style) = match app.input_mode() {
        InputMode::Normal => {
            let msg = match app.status_message() {
                Some(msg) => msg.to_string(),
                None => {
                    let view = app.view();
                    format!(
                        "sort:{} status:{} priority:{}  [/]search [s/f/p]cycle [?]help [q]uit",
                        view.sort_by, view.filter_status, view.filter_priority
                    )
                }
            };
            (msg, Style::default())
        }
        InputMode::Search => (
            format!("Search: {}_", app.view().search_query),
            Style::default().fg(Color::Yellow),
        ),
        InputMode::Confirm(action) => {
            let msg = match action {
                ConfirmAction::Delete(id) => format!("Delete task {}? [y/n]", id),
                ConfirmAction::ClearCompleted => "Delete all completed tasks? [y/n]".to_string(),
            };
            (msg, Style::default().fg(Color::Yellow))
        }
    };

    let view_str = match app.view_mode() {
        ViewMode::Cards => "[1:Cards]",
        ViewMode::Columns => "[2:Columns]",
    };

    let paragraph = Paragraph::new(format!("{} {}", view_str, content))
        .style(style)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(paragraph, area);
}

/// Split the screen into stats bar, content and status bar
pub fn frame_layout(area: Rect) -> (Rect, Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(3),
        ])
        .split(area);
    (chunks[0], chunks[1], chunks[2])
}
