//! Dialog Components
//!
//! Renders the action modal: record viewer, record form and delete
//! confirmation.

use super::centered_rect;
use crate::modal::{ActionModal, DeleteConfirm, RecordForm, RecordViewer, ViewState};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame, modal: &ActionModal) {
    let Some(kind) = modal.kind() else {
        return;
    };

    let popup_area = centered_rect(60, 35, f.area());
    f.render_widget(Clear, popup_area);

    let border_color = match modal {
        ActionModal::Delete(_) => Color::Red,
        ActionModal::Update(_) => Color::Yellow,
        ActionModal::Create(_) => Color::Green,
        _ => Color::Cyan,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(Span::styled(
            format!(" {} ", kind.title()),
            Style::default()
                .fg(border_color)
                .add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Line::from(" Esc: close ").right_aligned());

    let inner = block.inner(popup_area);
    f.render_widget(block, popup_area);

    match modal {
        ActionModal::View(viewer) => render_viewer(f, viewer, inner),
        ActionModal::Create(form) | ActionModal::Update(form) => render_form(f, form, inner),
        ActionModal::Delete(confirm) => render_delete(f, confirm, inner),
        ActionModal::Closed => {},
    }
}

fn render_viewer(f: &mut Frame, viewer: &RecordViewer, area: Rect) {
    let content = match &viewer.state {
        ViewState::Loading => vec![Line::from(Span::styled(
            "Loading...",
            Style::default().fg(Color::DarkGray),
        ))],
        ViewState::Failed(message) => vec![Line::from(Span::styled(
            message.as_str(),
            Style::default().fg(Color::Red),
        ))],
        ViewState::Loaded(record) => vec![
            Line::from(Span::styled("Name:", Style::default().fg(Color::DarkGray))),
            Line::from(Span::styled(
                record.name.as_str(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Id: ", Style::default().fg(Color::DarkGray)),
                Span::raw(record.id.as_str()),
            ]),
        ],
    };

    let paragraph = Paragraph::new(content).wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn render_form(f: &mut Frame, form: &RecordForm, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Label
            Constraint::Length(3), // Input
            Constraint::Length(1), // Error
            Constraint::Min(1),
            Constraint::Length(1), // Buttons
        ])
        .split(area);

    f.render_widget(
        Paragraph::new(Span::styled("Name", Style::default().fg(Color::DarkGray))),
        chunks[0],
    );

    let input_style = if form.submitting {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    };
    let cursor = if form.submitting { "" } else { "_" };
    let input = Paragraph::new(Span::styled(format!("{}{}", form.name, cursor), input_style))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    f.render_widget(input, chunks[1]);

    if let Some(err) = &form.error {
        f.render_widget(
            Paragraph::new(Span::styled(err.as_str(), Style::default().fg(Color::Red))),
            chunks[2],
        );
    }

    let buttons = Line::from(vec![
        Span::styled(" Cancel (Esc) ", Style::default().fg(Color::DarkGray)),
        Span::raw("    "),
        Span::styled(
            format!(" {} (Enter) ", form.submit_label()),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    f.render_widget(
        Paragraph::new(buttons).alignment(Alignment::Right),
        chunks[4],
    );
}

fn render_delete(f: &mut Frame, confirm: &DeleteConfirm, area: Rect) {
    let content_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(2),
        ])
        .split(area);

    let message = Paragraph::new(vec![
        Line::from(Span::styled(
            confirm.prompt(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            confirm.name.as_str(),
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(message, content_chunks[0]);

    if let Some(err) = &confirm.error {
        f.render_widget(
            Paragraph::new(Span::styled(err.as_str(), Style::default().fg(Color::Red)))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            content_chunks[1],
        );
    }

    let buttons = Line::from(vec![
        Span::styled(
            format!(" {} (y) ", confirm.confirm_label()),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Red)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("    "),
        Span::styled(" No (n) ", Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(
        Paragraph::new(buttons).alignment(Alignment::Center),
        content_chunks[2],
    );
}
