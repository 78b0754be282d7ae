//! Header Component
//!
//! Displays the server, record totals and key hints.

use crate::app::App;
use crate::model::ENTITY_NAME;
use crate::VERSION;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" tadmin v{} ", VERSION),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    // Row 1: Server and entity
    let server_line = Line::from(vec![
        Span::styled(" Server: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            app.client.base_url().as_str(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled("Resource: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{}s", ENTITY_NAME),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    f.render_widget(Paragraph::new(server_line), rows[0]);

    // Row 2: Totals, counting the filtered set
    let summary = app.table.summary(&app.records);
    let mut totals = vec![
        Span::styled(" Total records: ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            summary.total.to_string(),
            Style::default().fg(Color::White),
        ),
    ];
    if summary.total != app.records.len() {
        totals.push(Span::styled(
            format!(" (filtered from {})", app.records.len()),
            Style::default().fg(Color::DarkGray),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(totals)), rows[1]);

    // Row 3: Help hint
    let help_line = Line::from(vec![Span::styled(
        " ?:help  /:search  c:create  e:update  v:view  d:delete  r:refresh  q:quit",
        Style::default().fg(Color::DarkGray),
    )]);
    f.render_widget(Paragraph::new(help_line), rows[2]);
}
