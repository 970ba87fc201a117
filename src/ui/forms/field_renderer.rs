//! Field rendering utilities for forms

use crate::state::FieldError;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows taken by a single-line field: bordered box plus its error line
pub const FIELD_HEIGHT: u16 = 4;

/// Draw a labelled input box with its validation message underneath
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    is_active: bool,
    error: Option<&FieldError>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    draw_field_with_value(frame, chunks[0], label, value, is_active, error.is_some());

    if let Some(error) = error {
        let message = Paragraph::new(Span::styled(
            format!(" {}", error.message),
            Style::default().fg(Color::Red),
        ));
        frame.render_widget(message, chunks[1]);
    }
}

/// Draw a form field with a custom display value
fn draw_field_with_value(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    is_active: bool,
    is_invalid: bool,
) {
    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };

    let border_style = if is_invalid {
        Style::default().fg(Color::Red)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let display_value = if value.is_empty() && !is_active {
        "(empty)"
    } else {
        value
    };

    let cursor = if is_active { "▌" } else { "" };

    let mut lines: Vec<Line> = display_value
        .lines()
        .map(|l| Line::from(Span::styled(l.to_string(), style)))
        .collect();
    if is_active {
        if let Some(last) = lines.last_mut() {
            last.spans
                .push(Span::styled(cursor, Style::default().fg(Color::Cyan)));
        } else {
            lines.push(Line::from(Span::styled(
                cursor,
                Style::default().fg(Color::Cyan),
            )));
        }
    }

    let block = Block::default()
        .title(format!(" {} ", label))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
        area,
    );
}

/// Draw help text at the bottom of a form
pub fn draw_help_text(frame: &mut Frame, area: Rect, text: &str) {
    let help = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}
