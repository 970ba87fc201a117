//! Enrollment wizard rendering

use super::field_renderer::{draw_field, draw_help_text, FIELD_HEIGHT};
use crate::app::App;
use crate::state::{format_date, EnrollmentForm, Field, FormButton, Step, SubmissionPhase};
use crate::ui::components::{render_action_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Width of one wizard button
const BUTTON_WIDTH: u16 = 20;

/// Draw the enrollment wizard
pub fn draw_enrollment(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Student Enrollment ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(form) = app.state.form.enrollment() else {
        draw_help_text(frame, inner, "No enrollment in progress.");
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),             // Stepper
            Constraint::Length(1),             // Spacer
            Constraint::Min(FIELD_HEIGHT),     // Step fields
            Constraint::Length(BUTTON_HEIGHT), // Buttons
            Constraint::Length(1),             // Help text
        ])
        .horizontal_margin(1)
        .split(inner);

    frame.render_widget(Paragraph::new(Line::from(stepper_spans(form))), chunks[0]);
    draw_step_fields(frame, chunks[2], form);
    draw_buttons(frame, chunks[3], form);
    draw_help_text(frame, chunks[4], help_text(form));
}

/// Stepper line: completed steps green, current step highlighted
fn stepper_spans(form: &EnrollmentForm) -> Vec<Span<'static>> {
    let current = form.step.index();
    let submitted = form.phase == SubmissionPhase::Submitted;
    let mut spans = Vec::new();

    for step in Step::ALL {
        if step.index() > 0 {
            spans.push(Span::styled(" ─── ", Style::default().fg(Color::DarkGray)));
        }
        let (marker, style) = if submitted || step.index() < current {
            ("✓", Style::default().fg(Color::Green))
        } else if step.index() == current {
            (
                "●",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            ("○", Style::default().fg(Color::DarkGray))
        };
        spans.push(Span::styled(
            format!("{marker} {} {}", step.index() + 1, step.label()),
            style,
        ));
    }

    spans
}

/// Text shown inside a field's box
fn field_value(form: &EnrollmentForm, field: Field, is_active: bool) -> String {
    match field {
        Field::DateOfBirth => {
            let date = form.values.date_of_birth.map(format_date);
            match (date, is_active) {
                (Some(date), true) => format!("{date}  [{}]", form.date_picker.segment.label()),
                (Some(date), false) => date,
                (None, true) => "Press ↑ to pick a date".to_string(),
                (None, false) => String::new(),
            }
        }
        Field::Files => {
            let mut lines = Vec::new();
            if is_active || !form.file_chooser.input.is_empty() {
                lines.push(form.file_chooser.input.clone());
            }
            lines.extend(form.values.file_names().iter().map(|n| format!("• {n}")));
            lines.join("\n")
        }
        _ => form.values.text(field).unwrap_or_default().to_string(),
    }
}

fn field_label(field: Field) -> String {
    match field {
        Field::DateOfBirth => format!("{} (↑/↓ change, ←/→ segment)", field.label()),
        Field::Files => format!("{} (paths separated by ',', Enter to select)", field.label()),
        _ => field.label().to_string(),
    }
}

fn draw_step_fields(frame: &mut Frame, area: Rect, form: &EnrollmentForm) {
    let inputs = form.inputs();
    let constraints: Vec<Constraint> = inputs
        .iter()
        .map(|field| match field {
            Field::Files => {
                let rows = form.values.files.len() as u16 + 1;
                Constraint::Length(FIELD_HEIGHT + rows.saturating_sub(1))
            }
            _ => Constraint::Length(FIELD_HEIGHT),
        })
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (idx, field) in inputs.iter().enumerate() {
        let is_active = form.active_field_index == idx && !form.is_locked();
        draw_field(
            frame,
            chunks[idx],
            &field_label(*field),
            &field_value(form, *field, is_active),
            is_active,
            form.error(*field),
        );
    }
}

fn draw_buttons(frame: &mut Frame, area: Rect, form: &EnrollmentForm) {
    let buttons = form.buttons();
    let constraints: Vec<Constraint> = buttons
        .iter()
        .map(|_| Constraint::Length(BUTTON_WIDTH))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    let row_focused = form.is_buttons_row_active();
    for (idx, button) in buttons.iter().enumerate() {
        let accent = match button {
            FormButton::Back => Color::Gray,
            FormButton::Next => Color::Blue,
            FormButton::Submit | FormButton::NewEnrollment => Color::Green,
        };
        render_action_button(
            frame,
            chunks[idx],
            button.label(),
            row_focused && form.selected_button == idx,
            form.phase != SubmissionPhase::Submitting,
            Some(accent),
        );
    }
}

fn help_text(form: &EnrollmentForm) -> &'static str {
    match form.phase {
        SubmissionPhase::Submitted => "Enrollment submitted. Press n for a new enrollment.",
        SubmissionPhase::Submitting => "Submitting...",
        SubmissionPhase::Editing => "Tab/Shift+Tab: move between fields and buttons",
    }
}
