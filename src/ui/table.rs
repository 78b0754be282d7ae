//! Data Table widget
//!
//! Renders one page of a [`DataTable`] over any [`Tabular`] data, with the
//! search bar above and the page summary below. Rows come from a caller
//! supplied renderer so the table itself knows nothing about the record type.

use crate::table::{Column, DataTable, Tabular, EMPTY_PLACEHOLDER};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

pub struct TableProps<'a> {
    pub title: &'a str,
    pub searching: bool,
}

pub fn render<T, F>(
    f: &mut Frame,
    area: Rect,
    table: &DataTable,
    data: &[T],
    props: TableProps<'_>,
    render_row: F,
) where
    T: Tabular,
    F: Fn(&T, &[Column]) -> Row<'static>,
{
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Search
            Constraint::Min(3),    // Table
            Constraint::Length(1), // Pagination
        ])
        .split(area);

    render_search_bar(f, table, props.searching, chunks[0]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" {} ", props.title),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .title_alignment(Alignment::Center);

    let header = Row::new(table.columns().iter().map(|col| {
        Cell::from(format!(" {}", col.header.to_uppercase())).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
    }))
    .height(1);

    let widths: Vec<Constraint> = table
        .columns()
        .iter()
        .map(|col| Constraint::Percentage(col.width))
        .collect();

    let page = table.current_data(data);
    let mut state = TableState::default();

    let rows: Vec<Row> = if page.is_empty() {
        vec![placeholder_row(table.columns().len())]
    } else {
        state.select(Some(table.selected()));
        page.iter()
            .map(|item| render_row(item, table.columns()))
            .collect()
    };

    let widget = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );
    f.render_stateful_widget(widget, chunks[1], &mut state);

    render_pagination(f, table, data, chunks[2]);
}

/// A single row that reads as one cell spanning every column
fn placeholder_row(columns: usize) -> Row<'static> {
    let mut cells = vec![Cell::from(format!(" {}", EMPTY_PLACEHOLDER))
        .style(Style::default().fg(Color::DarkGray))];
    cells.extend((1..columns).map(|_| Cell::from("")));
    Row::new(cells)
}

fn render_search_bar(f: &mut Frame, table: &DataTable, searching: bool, area: Rect) {
    let line = if searching {
        Line::from(Span::styled(
            format!("/{}_", table.search_term()),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))
    } else if table.search_term().is_empty() {
        Line::from(Span::styled(
            "/ Search...",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(Span::styled(
            format!("/{}", table.search_term()),
            Style::default().fg(Color::DarkGray),
        ))
    };
    f.render_widget(Paragraph::new(line), area);
}

fn render_pagination<T: Tabular>(f: &mut Frame, table: &DataTable, data: &[T], area: Rect) {
    let summary = table.summary(data);
    let enabled = Style::default().fg(Color::White);
    let disabled = Style::default().fg(Color::DarkGray);
    let accent = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let line = Line::from(vec![
        Span::raw(" Showing "),
        Span::styled(summary.first.to_string(), accent),
        Span::raw(" to "),
        Span::styled(summary.last.to_string(), accent),
        Span::raw(" of "),
        Span::styled(summary.total.to_string(), accent),
        Span::raw(" results   "),
        Span::styled(
            "‹ prev",
            if table.has_previous() { enabled } else { disabled },
        ),
        Span::raw(format!("  Page {} of {}  ", summary.page, summary.total_pages)),
        Span::styled(
            "next ›",
            if table.has_next(data) { enabled } else { disabled },
        ),
    ]);
    f.render_widget(Paragraph::new(line), area);
}
