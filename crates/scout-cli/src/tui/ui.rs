//! Picker rendering using ratatui.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

use super::app::{PickerApp, StepRow};

/// Render the step list and the key help bar.
pub fn render(f: &mut Frame, app: &PickerApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // step list
            Constraint::Length(1), // status bar
        ])
        .split(f.area());

    render_steps(f, app, chunks[0]);
    render_status_bar(f, app, chunks[1]);
}

fn render_steps(f: &mut Frame, app: &PickerApp, area: Rect) {
    let items: Vec<ListItem> = app
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let style = if i == app.selected {
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(step_line(row)).style(style)
        })
        .collect();

    let title = format!(" Remove steps: {} ", truncate(&app.goal, 60));
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(list, area);
}

fn step_line(row: &StepRow) -> Line<'static> {
    let (mark, mark_color) = if row.marked {
        ("[x] ", Color::Red)
    } else {
        ("[ ] ", Color::Green)
    };
    Line::from(vec![
        Span::styled(mark, Style::default().fg(mark_color)),
        Span::raw(row.title.clone()),
        Span::styled(
            format!(" ({})", row.effort),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(
            format!(" -> {}", truncate(&row.targets.join(", "), 80)),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

fn render_status_bar(f: &mut Frame, app: &PickerApp, area: Rect) {
    let marked = app.marked_count();
    let bar = Line::from(vec![
        Span::styled(
            format!(" {}/{} marked ", marked, app.rows.len()),
            Style::default().bg(Color::Blue).fg(Color::White),
        ),
        Span::raw("  space:toggle  enter:confirm  q/esc:keep all  ctrl-c:abort"),
    ]);
    f.render_widget(Paragraph::new(bar), area);
}

// -- Helpers --

fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
        assert_eq!(truncate("ééééé", 2), "éé...");
    }

    #[test]
    fn step_line_shows_mark_effort_and_targets() {
        let row = StepRow {
            id: "0a1b2c3d".into(),
            title: "Add theme toggle".into(),
            effort: "S".into(),
            targets: vec!["src/Navbar.tsx".into(), "src/App.tsx".into()],
            marked: true,
        };
        let text: String = step_line(&row)
            .spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect();
        assert_eq!(text, "[x] Add theme toggle (S) -> src/Navbar.tsx, src/App.tsx");
    }
}
