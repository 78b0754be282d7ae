//! Terminal User Interface rendering module
//!
//! This module handles all UI rendering for tadmin using the ratatui
//! framework: the List Page with its record table, and overlays for the
//! action modal and help.
//!
//! # Architecture
//!
//! - `header` - Header bar with server info and record totals
//! - [`table`] - Generic searchable, paginated table widget
//! - `dialog` - Action modal (view, form, delete confirmation)
//! - `help` - Help overlay showing keybindings

mod dialog;
mod header;
mod help;
pub mod table;

use crate::app::{App, Mode};
use crate::model::{Record, ENTITY_NAME};
use crate::table::Column;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row},
    Frame,
};

pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Header
            Constraint::Min(1),    // Main content
            Constraint::Length(1), // Status line
        ])
        .split(f.area());

    header::render(f, app, chunks[0]);
    render_main_content(f, app, chunks[1]);
    render_status(f, app, chunks[2]);

    // Overlays
    match app.mode {
        Mode::Help => help::render(f),
        Mode::Modal => dialog::render(f, &app.modal),
        _ => {},
    }
}

fn render_main_content(f: &mut Frame, app: &App, area: Rect) {
    if app.loading && app.records.is_empty() {
        let msg = Paragraph::new(" Loading...").style(Style::default().fg(Color::Yellow));
        f.render_widget(msg, area);
        return;
    }

    let title = format!("{}s", ENTITY_NAME);
    table::render(
        f,
        area,
        &app.table,
        &app.records,
        table::TableProps {
            title: &title,
            searching: app.mode == Mode::Search,
        },
        record_row,
    );
}

/// Row renderer for the record table
fn record_row(record: &Record, columns: &[Column]) -> Row<'static> {
    let cells = columns.iter().map(|col| match col.accessor.as_str() {
        "action" => Cell::from(" v:view  e:update  d:delete")
            .style(Style::default().fg(Color::DarkGray)),
        "name" => Cell::from(format!(" {}", truncate_string(&record.name, 60))),
        other => Cell::from(format!(
            " {}",
            crate::table::Tabular::field(record, other).unwrap_or_default()
        )),
    });
    Row::new(cells.collect::<Vec<_>>())
}

/// Truncate string for display (Unicode-safe)
fn truncate_string(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count > max_len {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    } else {
        s.to_string()
    }
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let toast = app.notification_manager.current_toast();

    let (status_text, style) = if let Some(err) = &app.error_message {
        (
            format!("Error: {} | r: retry", err),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )
    } else if let Some(notif) = toast {
        (notif.toast_message(), Style::default().fg(Color::Green))
    } else if app.loading {
        ("Loading...".to_string(), Style::default().fg(Color::Yellow))
    } else if app.mode == Mode::Search {
        (
            "Type to search | Enter: apply | Esc: clear".to_string(),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (
            "h/l: page | j/k: move | ?: help".to_string(),
            Style::default().fg(Color::DarkGray),
        )
    };

    let line = Line::from(vec![
        Span::styled(
            format!("<{}s>", ENTITY_NAME.to_lowercase()),
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ),
        Span::raw(" "),
        Span::styled(status_text, style),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

/// Centered popup area, as percentages of `r`
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
