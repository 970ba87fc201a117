//! Notice dialog component

use super::base::{render_dialog, DialogConfig};
use crate::state::{Notice, NoticeKind};
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    Frame,
};

/// Render a blocking notice overlay centered on the screen
pub fn render_notice_dialog(frame: &mut Frame, notice: &Notice) {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let hint = vec![
        Span::raw("Press "),
        Span::styled("Enter", key_style),
        Span::raw(" or "),
        Span::styled("Esc", key_style),
        Span::raw(" to dismiss"),
    ];

    let (title, color) = match notice.kind {
        NoticeKind::Success => ("Success", Color::Green),
        NoticeKind::Error => ("Error", Color::Red),
    };

    render_dialog(
        frame,
        DialogConfig {
            title,
            title_color: color,
            border_color: color,
            message: &notice.message,
            hint: Some(hint),
            ..DialogConfig::default()
        },
    );
}
