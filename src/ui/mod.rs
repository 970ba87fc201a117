//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;
mod students;

use crate::app::App;
use crate::state::View;
use components::render_notice_dialog;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Draw the main layout with sidebar
    let (sidebar_area, main_area) = layout::create_layout(area);

    // Draw sidebar
    layout::draw_sidebar(frame, sidebar_area, app);

    // Draw main content based on current view
    match &app.state.current_view {
        View::Students => students::draw_list(frame, main_area, app),
        View::StudentDetail => students::draw_detail(frame, main_area, app),
        View::Enrollment => forms::draw_enrollment(frame, main_area, app),
    }

    // Draw status bar
    layout::draw_status_bar(frame, app);

    // Notices overlay everything until dismissed
    if let Some(notice) = app.state.current_notice() {
        render_notice_dialog(frame, notice);
    }
}
