//! Layout components (sidebar, status bar)

use super::components::{render_sidebar_button, BUTTON_HEIGHT};
use crate::app::{App, SIDEBAR_ITEMS};
use crate::platform::{BACK_SHORTCUT, NEXT_SHORTCUT, SUBMIT_SHORTCUT};
use crate::state::{SubmissionPhase, View};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Sidebar width in columns
const SIDEBAR_WIDTH: u16 = 20;

/// Create the main layout with sidebar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(SIDEBAR_WIDTH), // Sidebar
            Constraint::Min(0),                // Main content
        ])
        .split(area);

    // Reserve bottom line for status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(chunks[1]);

    let sidebar_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Sidebar content
            Constraint::Length(1), // Status bar continuation
        ])
        .split(chunks[0]);

    (sidebar_chunks[0], main_chunks[0])
}

/// Draw the sidebar with boxed buttons
pub fn draw_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let mut constraints = vec![Constraint::Length(1)]; // Title
    constraints.extend(SIDEBAR_ITEMS.iter().map(|_| Constraint::Length(BUTTON_HEIGHT)));
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let title = Paragraph::new(Span::styled(
        " Visa Direct NZ",
        Style::default().fg(Color::Magenta),
    ));
    frame.render_widget(title, chunks[0]);

    let active = app.active_sidebar_index();
    for (idx, (label, _)) in SIDEBAR_ITEMS.iter().enumerate() {
        let key = (idx + 1).to_string();
        render_sidebar_button(frame, chunks[idx + 1], &key, label, idx == active);
    }
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![Span::raw(" ")];

    // View-specific hints
    spans.push(Span::styled(
        get_view_hints(app),
        Style::default().fg(Color::Gray),
    ));

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Yellow)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    // Quit hint on the right
    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current view
fn get_view_hints(app: &App) -> String {
    match app.state.current_view {
        View::Students => "1/2:section  j/k:nav  Enter:view details".to_string(),
        View::StudentDetail => "j/k:scroll  Esc:back".to_string(),
        View::Enrollment => {
            let submitted = app
                .state
                .form
                .enrollment()
                .is_some_and(|f| f.phase == SubmissionPhase::Submitted);
            if submitted {
                "n:new enrollment  Esc:back".to_string()
            } else {
                format!(
                    "Tab:next field  {NEXT_SHORTCUT}:next  {BACK_SHORTCUT}:back  {SUBMIT_SHORTCUT}:submit  Esc:leave"
                )
            }
        }
    }
}
