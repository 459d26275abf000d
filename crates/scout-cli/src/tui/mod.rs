//! Interactive step picker: a full-screen checklist for pruning a plan.

pub mod app;
mod ui;

use std::collections::HashSet;
use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use scout_core::plan::Plan;
use scout_core::refine::{RefineError, Refiner};

use app::{Outcome, PickerApp};

/// Terminal-backed [`Refiner`]. Opens one picker session per plan.
#[derive(Debug, Default)]
pub struct StepPicker;

impl Refiner for StepPicker {
    fn select_removals(&mut self, plan: &Plan<'_>) -> Result<HashSet<String>, RefineError> {
        let mut app = PickerApp::new(plan);
        if app.rows.is_empty() {
            return Ok(HashSet::new());
        }

        // Set up terminal.
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = run_event_loop(&mut terminal, &mut app);

        // Restore terminal.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result?;
        if app.outcome == Some(Outcome::Abort) {
            return Err(RefineError::Aborted);
        }
        Ok(app.removals())
    }
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut PickerApp,
) -> io::Result<()> {
    while app.outcome.is_none() {
        terminal.draw(|f| ui::render(f, app))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.finish(Outcome::Abort);
            }
            KeyCode::Char('q') | KeyCode::Esc => app.finish(Outcome::KeepAll),
            KeyCode::Enter => app.finish(Outcome::Confirm),
            KeyCode::Char(' ') => app.toggle(),
            KeyCode::Char('j') | KeyCode::Down => app.move_down(),
            KeyCode::Char('k') | KeyCode::Up => app.move_up(),
            _ => {}
        }
    }
    Ok(())
}
