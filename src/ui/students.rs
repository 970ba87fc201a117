//! Students list and detail views

use super::components::{render_table, Column};
use crate::app::App;
use crate::state::{Student, StudentProfile};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn student_columns() -> [Column<Student>; 5] {
    [
        Column::new("ID", Constraint::Length(4), |s: &Student| s.id.to_string()),
        Column::new("Name", Constraint::Fill(2), |s: &Student| s.name.clone()),
        Column::new("Visa Lodged", Constraint::Length(12), |s: &Student| {
            s.visa_lodged_label().to_string()
        }),
        Column::new("Phone Number", Constraint::Fill(2), |s: &Student| {
            s.phone_number.clone()
        }),
        Column::new("Actions", Constraint::Length(14), |_: &Student| {
            "View Details".to_string()
        }),
    ]
}

/// Draw the students table
pub fn draw_list(frame: &mut Frame, area: Rect, app: &App) {
    if app.state.students.is_empty() {
        let content = Paragraph::new("No students found.")
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .title(" Students ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            );
        frame.render_widget(content, area);
        return;
    }

    render_table(
        frame,
        area,
        "Students",
        &student_columns(),
        &app.state.students,
        Some(app.state.selected_index),
    );
}

fn heading(text: &str) -> Line<'_> {
    Line::from(Span::styled(
        text,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
}

fn labelled<'a>(label: &'a str, value: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(label, Style::default().fg(Color::DarkGray)),
        Span::raw(value),
    ])
}

/// Lines of the profile page, top to bottom
fn profile_lines(profile: &StudentProfile) -> Vec<Line<'_>> {
    let mut lines = vec![
        heading("Contact Details"),
        labelled("Email: ", &profile.email),
        labelled("Phone: ", &profile.phone),
        Line::from(""),
        heading("Address"),
        Line::from(profile.address.as_str()),
        Line::from(format!("{}, {}", profile.city, profile.country)),
        Line::from(""),
        heading("Personal Note"),
        Line::from(Span::styled(
            profile.personal_note.as_str(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
        heading("Academic Qualifications"),
    ];

    for academic in &profile.academics {
        lines.push(Line::from(vec![
            Span::styled("• ", Style::default().fg(Color::Cyan)),
            Span::styled(
                format!("{} ", academic.degree),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(
                "- {} ({}) GPA: {}",
                academic.institution, academic.year, academic.gpa
            )),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(heading("Language Tests"));
    for test in &profile.language_tests {
        lines.push(Line::from(vec![
            Span::styled("• ", Style::default().fg(Color::Cyan)),
            Span::raw(format!("{}: {}", test.name, test.score)),
        ]));
    }

    lines
}

/// Draw the student detail view
pub fn draw_detail(frame: &mut Frame, area: Rect, app: &App) {
    let student = app
        .state
        .view_params
        .student_id
        .and_then(|id| app.state.student(id));

    let Some(student) = student else {
        let message = Paragraph::new("Student not found")
            .style(Style::default().fg(Color::Red))
            .block(
                Block::default()
                    .title(" Student ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            );
        frame.render_widget(message, area);
        return;
    };

    let profile = &app.state.profile;
    let title = format!(" {}'s Profile (#{}) ", profile.name, student.id);

    let paragraph = Paragraph::new(profile_lines(profile))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false })
        .scroll((u16::try_from(app.state.scroll_offset).unwrap_or(u16::MAX), 0));

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{mock_profile, mock_students};

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_profile_lines_include_sections() {
        let profile = mock_profile();
        let lines: Vec<String> = profile_lines(&profile).iter().map(text).collect();

        assert!(lines.contains(&"Email: john.doe@example.com".to_string()));
        assert!(lines.contains(&"Auckland, New Zealand".to_string()));
        assert!(lines.contains(&"• IELTS: 7.5".to_string()));
        assert!(lines
            .iter()
            .any(|l| l.contains("Master's") && l.contains("LMN University")));
    }

    #[test]
    fn test_profile_line_count_matches_rendering() {
        let profile = mock_profile();
        assert_eq!(profile_lines(&profile).len(), profile.line_count());
    }

    #[test]
    fn test_student_columns_render_visa_label() {
        let columns = student_columns();
        let students = mock_students();
        let cells: Vec<String> = columns.iter().map(|c| (c.render)(&students[1])).collect();
        assert_eq!(
            cells,
            vec!["2", "Bob Charlie", "No", "+64-288-222-222", "View Details"]
        );
    }
}
