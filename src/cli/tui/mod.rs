//! Interactive task board
//!
//! Terminal interface over the same store and view engine the `list`
//! command uses, built on ratatui.

mod app;
mod event;
mod ui;
mod utils;
mod views;

use std::panic::{self, AssertUnwindSafe};
use std::str::FromStr;

use anyhow::{anyhow, Result};

use super::Output;
use crate::storage::Project;
use app::App;
use event::EventHandler;

/// Board layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// One card per task in view order
    #[default]
    Cards,
    /// Tasks split into Pending / In Progress / Completed columns
    Columns,
}

impl FromStr for ViewMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cards" | "c" | "1" => Ok(ViewMode::Cards),
            "columns" | "board" | "2" => Ok(ViewMode::Columns),
            _ => Err(()),
        }
    }
}

/// Launch the board
pub fn run(project: &Project, output: &Output, view: &str) -> Result<()> {
    output.verbose_ctx("tui", "Initializing task board");

    let view_mode = view.parse().unwrap_or_else(|_| {
        output.verbose_ctx("tui", &format!("Unknown view '{}', using cards", view));
        ViewMode::default()
    });

    // Load before touching the terminal so a broken store reports normally
    let mut app = App::new(project, view_mode)?;

    let mut terminal = ui::init_terminal()?;
    let event_handler = EventHandler::new(250);

    // Restore the terminal even if the loop panics
    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        app.run(&mut terminal, event_handler)
    }));

    let restore_result = ui::restore_terminal();

    match result {
        Ok(inner_result) => {
            restore_result?;
            inner_result
        }
        Err(panic_payload) => {
            let _ = restore_result;
            if let Some(s) = panic_payload.downcast_ref::<&str>() {
                Err(anyhow!("Board panicked: {}", s))
            } else if let Some(s) = panic_payload.downcast_ref::<String>() {
                Err(anyhow!("Board panicked: {}", s))
            } else {
                Err(anyhow!("Board panicked with unknown error"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_mode_from_str() {
        assert_eq!(ViewMode::from_str("cards").unwrap(), ViewMode::Cards);
        assert_eq!(ViewMode::from_str("CARDS").unwrap(), ViewMode::Cards);
        assert_eq!(ViewMode::from_str("1").unwrap(), ViewMode::Cards);
        assert_eq!(ViewMode::from_str("columns").unwrap(), ViewMode::Columns);
        assert_eq!(ViewMode::from_str("2").unwrap(), ViewMode::Columns);
        assert!(ViewMode::from_str("graph").is_err());
        assert!(ViewMode::from_str("").is_err());
    }

    #[test]
    fn view_mode_default_is_cards() {
        assert_eq!(ViewMode::default(), ViewMode::Cards);
    }
}
