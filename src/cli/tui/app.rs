//! Board state and key handling

use anyhow::Result;
use chrono::{DateTime, Utc};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;

use super::event::{Event, EventHandler};
use super::ui::Terminal;
use super::views;
use super::ViewMode;
use crate::domain::{compute_stats, compute_view, Task, TaskId, TaskStats, ViewConfig};
use crate::storage::{Project, TaskStore};

/// Input mode
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing into the search box
    Search,
    Confirm(ConfirmAction),
}

/// Destructive actions waiting for a y/n answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    Delete(TaskId),
    ClearCompleted,
}

/// Application state
pub struct App {
    store: TaskStore,

    /// Full collection in stored order
    tasks: Vec<Task>,

    /// Active search, filters and sort
    view: ViewConfig,

    /// Task IDs in display order after running the view
    visible: Vec<TaskId>,

    /// Index into `visible`
    selected: usize,

    view_mode: ViewMode,
    input_mode: InputMode,
    status_message: Option<String>,
    confirm_destructive: bool,
    should_quit: bool,

    /// Reference time for due-date highlighting
    now: DateTime<Utc>,
}

impl App {
    /// Create the board for a project, starting from its configured view
    pub fn new(project: &Project, view_mode: ViewMode) -> Result<Self> {
        let config = &project.config().project;
        let view = config.view.resolve(None, None, None, None);
        Self::with_store(
            project.task_store(),
            view,
            view_mode,
            config.confirm_destructive,
            Utc::now(),
        )
    }

    pub(super) fn with_store(
        store: TaskStore,
        view: ViewConfig,
        view_mode: ViewMode,
        confirm_destructive: bool,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let tasks = store.read_all()?;
        let mut app = Self {
            store,
            tasks,
            view,
            visible: Vec::new(),
            selected: 0,
            view_mode,
            input_mode: InputMode::Normal,
            status_message: None,
            confirm_destructive,
            should_quit: false,
            now,
        };
        app.recompute();
        Ok(app)
    }

    /// Run the main loop until the user quits
    pub fn run(&mut self, terminal: &mut Terminal, events: EventHandler) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;

            match events.next()? {
                Event::Key(key) => self.handle_key(key)?,
                Event::Resize => {}
                Event::Tick => self.now = Utc::now(),
            }
        }

        Ok(())
    }

    fn draw(&self, frame: &mut Frame) {
        match self.view_mode {
            ViewMode::Cards => views::cards::draw(frame, self),
            ViewMode::Columns => views::columns::draw(frame, self),
        }
    }

    pub(super) fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return Ok(());
        }

        match &self.input_mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::Search => {
                self.handle_search_key(key);
                Ok(())
            }
            InputMode::Confirm(_) => self.handle_confirm_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Result<()> {
        self.status_message = None;

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,

            KeyCode::Char('j') | KeyCode::Down => self.move_selection(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection(-1),

            KeyCode::Char('1') => self.view_mode = ViewMode::Cards,
            KeyCode::Char('2') => self.view_mode = ViewMode::Columns,

            KeyCode::Char('/') => self.input_mode = InputMode::Search,
            KeyCode::Char('s') => {
                self.view.sort_by = self.view.sort_by.cycle();
                self.recompute();
                self.status_message = Some(format!("Sort: {}", self.view.sort_by));
            }
            KeyCode::Char('f') => {
                self.view.filter_status = self.view.filter_status.cycle();
                self.recompute();
                self.status_message = Some(format!("Status: {}", self.view.filter_status));
            }
            KeyCode::Char('p') => {
                self.view.filter_priority = self.view.filter_priority.cycle();
                self.recompute();
                self.status_message = Some(format!("Priority: {}", self.view.filter_priority));
            }

            KeyCode::Enter | KeyCode::Char(' ') => self.advance_selected()?,
            KeyCode::Char('x') => {
                if let Some(id) = self.selected_id() {
                    self.request(ConfirmAction::Delete(id))?;
                }
            }
            KeyCode::Char('C') => {
                if self.tasks.iter().any(|t| t.status.is_complete()) {
                    self.request(ConfirmAction::ClearCompleted)?;
                } else {
                    self.status_message = Some("No completed tasks".to_string());
                }
            }
            KeyCode::Char('r') => {
                self.reload()?;
                self.status_message = Some("Reloaded".to_string());
            }
            KeyCode::Char('?') => {
                self.status_message = Some(
                    "j/k:move enter:advance /:search s:sort f:status p:priority x:delete C:clear q:quit"
                        .to_string(),
                );
            }

            _ => {}
        }

        Ok(())
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.view.search_query.clear();
                self.input_mode = InputMode::Normal;
                self.recompute();
            }
            KeyCode::Enter => self.input_mode = InputMode::Normal,
            KeyCode::Backspace => {
                self.view.search_query.pop();
                self.recompute();
            }
            KeyCode::Char(c) => {
                self.view.search_query.push(c);
                self.recompute();
            }
            _ => {}
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                if let InputMode::Confirm(action) = std::mem::take(&mut self.input_mode) {
                    self.perform(action)?;
                }
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                self.status_message = Some("Cancelled".to_string());
            }
            _ => {}
        }

        Ok(())
    }

    fn request(&mut self, action: ConfirmAction) -> Result<()> {
        if self.confirm_destructive {
            self.input_mode = InputMode::Confirm(action);
            Ok(())
        } else {
            self.perform(action)
        }
    }

    fn perform(&mut self, action: ConfirmAction) -> Result<()> {
        match action {
            ConfirmAction::Delete(id) => {
                self.store.remove(id)?;
                self.status_message = Some(format!("Deleted task {}", id));
            }
            ConfirmAction::ClearCompleted => {
                let removed = self.store.remove_completed()?;
                self.status_message = Some(format!("Removed {} completed task(s)", removed));
            }
        }
        self.reload()
    }

    /// Move the selected task to its next status
    fn advance_selected(&mut self) -> Result<()> {
        let Some(id) = self.selected_id() else {
            return Ok(());
        };
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(());
        };

        let next = task.status.next();
        task.set_status(next);
        if !self.store.update(task)? {
            self.reload()?;
            self.status_message = Some(format!("Task {} was removed elsewhere", id));
            return Ok(());
        }
        self.status_message = Some(format!("{} is now {}", task.title, next));

        self.recompute();
        // Keep the cursor on the same task when it is still visible
        if let Some(index) = self.visible.iter().position(|v| *v == id) {
            self.selected = index;
        }
        Ok(())
    }

    fn move_selection(&mut self, delta: isize) {
        if self.visible.is_empty() {
            return;
        }
        let len = self.visible.len() as isize;
        self.selected = (self.selected as isize + delta).rem_euclid(len) as usize;
    }

    /// Re-read the store, picking up edits made from another shell
    fn reload(&mut self) -> Result<()> {
        self.tasks = self.store.read_all()?;
        self.recompute();
        Ok(())
    }

    fn recompute(&mut self) {
        self.visible = compute_view(&self.tasks, &self.view)
            .into_iter()
            .map(|t| t.id)
            .collect();
        if self.selected >= self.visible.len() {
            self.selected = self.visible.len().saturating_sub(1);
        }
    }

    fn selected_id(&self) -> Option<TaskId> {
        self.visible.get(self.selected).copied()
    }

    // Accessors for views

    /// Tasks in display order
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.visible
            .iter()
            .filter_map(|id| self.tasks.iter().find(|t| t.id == *id))
            .collect()
    }

    pub fn stats(&self) -> TaskStats {
        compute_stats(&self.tasks, self.now)
    }

    pub fn total(&self) -> usize {
        self.tasks.len()
    }

    pub fn selected_task(&self) -> Option<&Task> {
        let id = self.selected_id()?;
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn view(&self) -> &ViewConfig {
        &self.view
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn input_mode(&self) -> &InputMode {
        &self.input_mode
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }
}
