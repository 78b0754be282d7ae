//! Help Overlay
//!
//! Shows keyboard shortcuts and help information.

use super::centered_rect;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

fn section(title: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        title,
        Style::default().add_modifier(Modifier::BOLD),
    ))
}

fn key(keys: &'static str, description: &'static str, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<12}", keys), Style::default().fg(color)),
        Span::raw(description),
    ])
}

pub fn render(f: &mut Frame) {
    let area = f.area();
    let popup_area = centered_rect(70, 80, area);

    f.render_widget(Clear, popup_area);

    let y = Color::Yellow;
    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        section("Navigation"),
        key("j/k, ↑/↓", "Move up/down", y),
        key("h/l, [/]", "Previous/next page", y),
        key("r/R", "Refresh or retry loading", y),
        Line::from(""),
        section("Search"),
        key("/", "Start searching", y),
        key("Enter", "Keep search and return to list", y),
        key("Esc", "Clear search", y),
        Line::from(""),
        section("Actions"),
        key("v/Enter", "View record", y),
        key("c", "Create record", y),
        key("e", "Update record", y),
        key("d/Delete", "Delete record (destructive)", Color::Red),
        Line::from(""),
        section("In dialogs"),
        key("Enter", "Submit form / confirm delete", y),
        key("y/n", "Confirm / cancel delete", y),
        key("Esc", "Close and discard changes", y),
        Line::from(""),
        key("?/Esc", "Close help", y),
        key("q", "Quit application", y),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(Span::styled(
            " Help ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .alignment(Alignment::Left);

    f.render_widget(paragraph, popup_area);
}
