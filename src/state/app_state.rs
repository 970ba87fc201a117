//! Application state definitions

use super::forms::{EnrollmentForm, FormState};
use super::students::{mock_profile, mock_students, Student, StudentProfile};
use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Students,
    StudentDetail,
    Enrollment,
}

impl View {
    /// Views that hold unsaved form input
    pub fn is_form_view(&self) -> bool {
        matches!(self, View::Enrollment)
    }
}

/// View parameters for navigation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewParams {
    pub student_id: Option<u32>,
}

/// Kind of modal notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Blocking notification shown until dismissed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

/// Main application state
pub struct AppState {
    // Navigation
    pub current_view: View,
    pub view_params: ViewParams,
    pub view_history: Vec<(View, ViewParams)>,

    // Data
    pub students: Vec<Student>,
    pub profile: StudentProfile,

    // Selection
    pub selected_index: usize,

    // UI state
    pub scroll_offset: usize,
    pub notices: VecDeque<Notice>,

    // Form state
    pub form: FormState,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            current_view: View::default(),
            view_params: ViewParams::default(),
            view_history: Vec::new(),
            students: mock_students(),
            profile: mock_profile(),
            selected_index: 0,
            scroll_offset: 0,
            notices: VecDeque::new(),
            form: FormState::None,
        }
    }

    /// Move selection down
    pub fn move_selection_down(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Reset selection
    pub fn reset_selection(&mut self) {
        self.selected_index = 0;
        self.scroll_offset = 0;
    }

    /// Scroll down, stopping at the last line of the profile
    pub fn scroll_down(&mut self) {
        let last = self.profile.line_count().saturating_sub(1);
        self.scroll_offset = (self.scroll_offset + 1).min(last);
    }

    /// Scroll up
    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    pub fn selected_student(&self) -> Option<&Student> {
        self.students.get(self.selected_index)
    }

    pub fn student(&self, id: u32) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    /// Queue a notice for display
    pub fn push_notice(&mut self, notice: Notice) {
        self.notices.push_back(notice);
    }

    pub fn has_notice(&self) -> bool {
        !self.notices.is_empty()
    }

    pub fn current_notice(&self) -> Option<&Notice> {
        self.notices.front()
    }

    pub fn dismiss_notice(&mut self) {
        self.notices.pop_front();
    }

    /// Open a fresh enrollment unless one is already in progress
    pub fn start_enrollment(&mut self) {
        if matches!(self.form, FormState::None) {
            self.form = FormState::Enrollment(EnrollmentForm::new());
        }
    }

    /// Discard any form input
    pub fn clear_form(&mut self) {
        self.form = FormState::None;
    }
}
