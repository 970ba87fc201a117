//! Application state and core logic

use crate::config::TuiConfig;
use crate::platform::is_shortcut;
use crate::state::{
    AppState, EnrollmentForm, Field, FormButton, Notice, SubmissionPhase, TransitionError, View,
    ViewParams,
};
use crate::submission::{self, EnrollmentTransport, HttpTransport};
use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Sidebar sections, in display order
pub const SIDEBAR_ITEMS: [(&str, View); 2] =
    [("Students", View::Students), ("Enrollments", View::Enrollment)];

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Outbound channel for enrollment submissions
    transport: Box<dyn EnrollmentTransport>,
    /// Source of the current date for age validation
    clock: fn() -> NaiveDate,
    /// Whether the app should quit
    quit: bool,
    /// Transient message shown in the status bar
    pub status_message: Option<String>,
}

impl App {
    /// Create a new App posting to the configured endpoint
    pub fn new(config: &TuiConfig) -> Self {
        let transport = HttpTransport::from_config(config);
        tracing::info!("Submitting enrollments to {}", transport.endpoint());
        Self::with_transport(Box::new(transport))
    }

    pub fn with_transport(transport: Box<dyn EnrollmentTransport>) -> Self {
        Self {
            state: AppState::default(),
            transport,
            clock: local_today,
            quit: false,
            status_message: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    /// Index of the highlighted sidebar entry
    pub fn active_sidebar_index(&self) -> usize {
        match self.state.current_view {
            View::Students | View::StudentDetail => 0,
            View::Enrollment => 1,
        }
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle notice dismissal first (modal)
        if self.state.has_notice() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_notice();
            }
            return Ok(());
        }

        // Clear any status messages on key press
        self.status_message = None;

        // Sidebar shortcuts, only where digits are not form input
        if !self.state.current_view.is_form_view() && key.modifiers == KeyModifiers::NONE {
            match key.code {
                KeyCode::Char('1') => {
                    self.open_section(0);
                    return Ok(());
                }
                KeyCode::Char('2') => {
                    self.open_section(1);
                    return Ok(());
                }
                _ => {}
            }
        }

        match self.state.current_view {
            View::Students => self.handle_students_key(key),
            View::StudentDetail => self.handle_student_detail_key(key),
            View::Enrollment => self.handle_enrollment_key(key).await,
        }

        Ok(())
    }

    /// Navigate to a new view
    pub fn navigate(&mut self, view: View, params: ViewParams) {
        if view.is_form_view() {
            self.state.start_enrollment();
        }
        // Save current view to history
        self.state.view_history.push((
            self.state.current_view.clone(),
            self.state.view_params.clone(),
        ));
        tracing::info!("Navigating to {:?}", view);
        self.state.current_view = view;
        self.state.view_params = params;
        self.state.scroll_offset = 0;
    }

    /// Go back to previous view
    pub fn go_back(&mut self) {
        if self.state.current_view.is_form_view() {
            self.state.clear_form();
        }
        // Skip form views in history to go back to the last non-form view
        while let Some((view, params)) = self.state.view_history.pop() {
            if view.is_form_view() {
                self.state.clear_form();
                continue;
            }
            self.state.current_view = view;
            self.state.view_params = params;
            self.state.scroll_offset = 0;
            return;
        }
    }

    /// Jump to a sidebar section
    pub fn open_section(&mut self, index: usize) {
        let Some((_, view)) = SIDEBAR_ITEMS.get(index).cloned() else {
            return;
        };
        if view == self.state.current_view {
            return;
        }
        if self.state.current_view.is_form_view() {
            self.state.clear_form();
        }
        self.state.reset_selection();
        // Section switches start a fresh history
        self.state.view_history.clear();
        self.navigate(view, ViewParams::default());
    }

    /// Handle keys in Students view
    fn handle_students_key(&mut self, key: KeyEvent) {
        let len = self.state.students.len();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.state.move_selection_down(len),
            KeyCode::Char('k') | KeyCode::Up => self.state.move_selection_up(),
            KeyCode::Enter => {
                if let Some(student) = self.state.selected_student() {
                    let params = ViewParams {
                        student_id: Some(student.id),
                    };
                    self.navigate(View::StudentDetail, params);
                }
            }
            _ => {}
        }
    }

    /// Handle keys in StudentDetail view
    fn handle_student_detail_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.state.scroll_down(),
            KeyCode::Char('k') | KeyCode::Up => self.state.scroll_up(),
            KeyCode::Esc | KeyCode::Backspace => self.go_back(),
            _ => {}
        }
    }

    fn enrollment(&self) -> Option<&EnrollmentForm> {
        self.state.form.enrollment()
    }

    /// Handle keys in Enrollment view
    async fn handle_enrollment_key(&mut self, key: KeyEvent) {
        if self.enrollment().is_none() {
            self.state.start_enrollment();
        }

        match key.code {
            KeyCode::Esc => self.go_back(),
            // Keyboard shortcuts (work from anywhere)
            KeyCode::Char('s') if is_shortcut(key.modifiers) => self.submit().await,
            KeyCode::Char('n') if is_shortcut(key.modifiers) => self.next_step(),
            KeyCode::Char('b') if is_shortcut(key.modifiers) => self.previous_step(),
            KeyCode::Tab => self.state.form.next_field(),
            KeyCode::BackTab => self.state.form.prev_field(),
            _ if self.enrollment().is_some_and(|f| f.is_buttons_row_active()) => {
                self.handle_enrollment_buttons_key(key).await
            }
            _ => self.handle_enrollment_input_key(key),
        }
    }

    /// Keys while the button row has focus
    async fn handle_enrollment_buttons_key(&mut self, key: KeyEvent) {
        let submitted = self
            .enrollment()
            .is_some_and(|f| f.phase == SubmissionPhase::Submitted);
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                if let Some(form) = self.state.form.enrollment_mut() {
                    form.prev_button();
                }
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if let Some(form) = self.state.form.enrollment_mut() {
                    form.next_button();
                }
            }
            KeyCode::Enter => {
                let button = self.enrollment().and_then(|f| f.selected_form_button());
                if let Some(button) = button {
                    self.activate_button(button).await;
                }
            }
            KeyCode::Char('n') if submitted => self.new_enrollment(),
            _ => {}
        }
    }

    /// Keys while one of the step's inputs has focus
    fn handle_enrollment_input_key(&mut self, key: KeyEvent) {
        let today = self.today();
        let Some(form) = self.state.form.enrollment_mut() else {
            return;
        };

        if form.phase == SubmissionPhase::Submitted {
            if key.code == KeyCode::Char('n') {
                self.new_enrollment();
            }
            return;
        }

        match (form.active_input(), key.code) {
            (Some(Field::DateOfBirth), KeyCode::Up | KeyCode::Char('k')) => {
                form.shift_date(1, today)
            }
            (Some(Field::DateOfBirth), KeyCode::Down | KeyCode::Char('j')) => {
                form.shift_date(-1, today)
            }
            (Some(Field::DateOfBirth), KeyCode::Left | KeyCode::Char('h')) => {
                form.date_picker.prev_segment()
            }
            (Some(Field::DateOfBirth), KeyCode::Right | KeyCode::Char('l')) => {
                form.date_picker.next_segment()
            }
            (Some(Field::Files), KeyCode::Enter) => form.confirm_file_selection(today),
            (Some(_), KeyCode::Enter) => self.state.form.next_field(),
            (Some(_), KeyCode::Backspace) => form.backspace(today),
            (Some(_), KeyCode::Char(c)) => form.input_char(c, today),
            _ => {}
        }
    }

    async fn activate_button(&mut self, button: FormButton) {
        match button {
            FormButton::Back => self.previous_step(),
            FormButton::Next => self.next_step(),
            FormButton::Submit => self.submit().await,
            FormButton::NewEnrollment => self.new_enrollment(),
        }
    }

    fn report_refusal(&mut self, action: &str, err: TransitionError) {
        tracing::warn!("{action} refused: {err}");
        // Field errors are rendered under their inputs
        if !matches!(err, TransitionError::Invalid { .. }) {
            self.status_message = Some(err.to_string());
        }
    }

    /// Advance the wizard one step
    pub fn next_step(&mut self) {
        let today = self.today();
        let Some(form) = self.state.form.enrollment_mut() else {
            return;
        };
        match form.next(today) {
            Ok(step) => tracing::info!("Enrollment advanced to {step}"),
            Err(err) => self.report_refusal("Next", err),
        }
    }

    /// Return to the previous wizard step
    pub fn previous_step(&mut self) {
        let Some(form) = self.state.form.enrollment_mut() else {
            return;
        };
        match form.back() {
            Ok(step) => tracing::info!("Enrollment returned to {step}"),
            Err(err) => self.report_refusal("Back", err),
        }
    }

    /// Validate the final step and send the enrollment once
    pub async fn submit(&mut self) {
        let today = self.today();
        let Some(form) = self.state.form.enrollment_mut() else {
            return;
        };
        let record = match form.begin_submit(today) {
            Ok(record) => record,
            Err(err) => {
                self.report_refusal("Submit", err);
                return;
            }
        };

        let outcome = submission::submit_enrollment(self.transport.as_ref(), &record).await;

        if let Some(form) = self.state.form.enrollment_mut() {
            form.finish_submit(outcome.is_success());
        }
        let notice = if outcome.is_success() {
            Notice::success(outcome.message())
        } else {
            Notice::error(outcome.message())
        };
        self.state.push_notice(notice);
    }

    /// Discard the submitted enrollment and start an empty one
    pub fn new_enrollment(&mut self) {
        if let Some(form) = self.state.form.enrollment_mut() {
            form.reset();
            tracing::info!("Started a new enrollment");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{latest_birth_date, NoticeKind, Step};
    use crate::submission::{MockEnrollmentTransport, SubmissionError};
    use pretty_assertions::assert_eq;

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    fn app_with(mock: MockEnrollmentTransport) -> App {
        let mut app = App::with_transport(Box::new(mock));
        app.clock = fixed_today;
        app
    }

    fn app() -> App {
        app_with(MockEnrollmentTransport::new())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    async fn press(app: &mut App, code: KeyCode) {
        app.handle_key(key(code)).await.unwrap();
    }

    async fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c)).await;
        }
    }

    fn form(app: &App) -> &EnrollmentForm {
        app.state.form.enrollment().unwrap()
    }

    /// Fill every step with valid data and land on the files step
    async fn fill_to_files_step(app: &mut App) {
        app.open_section(1);
        type_text(app, "Jane Doe").await;
        press(app, KeyCode::Tab).await;
        type_text(app, "jane@example.com").await;
        press(app, KeyCode::Tab).await;
        press(app, KeyCode::Up).await;
        app.handle_key(ctrl('n')).await.unwrap();
        type_text(app, "1 Main St").await;
        press(app, KeyCode::Tab).await;
        type_text(app, "BSc").await;
        app.handle_key(ctrl('n')).await.unwrap();
    }

    mod navigation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_should_quit_initially_false() {
            let app = app();
            assert!(!app.should_quit());
        }

        #[test]
        fn test_navigate_saves_history() {
            let mut app = app();
            app.navigate(View::StudentDetail, ViewParams { student_id: Some(2) });
            assert_eq!(app.state.current_view, View::StudentDetail);
            assert_eq!(app.state.view_history.len(), 1);
            assert_eq!(app.state.view_params.student_id, Some(2));
        }

        #[test]
        fn test_go_back_restores_previous_view() {
            let mut app = app();
            app.navigate(View::StudentDetail, ViewParams { student_id: Some(1) });
            app.go_back();
            assert_eq!(app.state.current_view, View::Students);
            assert!(app.state.view_history.is_empty());
        }

        #[test]
        fn test_go_back_skips_form_views() {
            let mut app = app();
            app.navigate(View::Enrollment, ViewParams::default());
            app.navigate(View::StudentDetail, ViewParams { student_id: Some(1) });
            app.go_back();
            assert_eq!(app.state.current_view, View::Students);
            assert!(app.state.form.enrollment().is_none());
        }

        #[test]
        fn test_go_back_empty_history_does_nothing() {
            let mut app = app();
            app.go_back();
            assert_eq!(app.state.current_view, View::Students);
        }

        #[test]
        fn test_leaving_enrollment_discards_form() {
            let mut app = app();
            app.open_section(1);
            assert!(app.state.form.enrollment().is_some());
            app.go_back();
            assert_eq!(app.state.current_view, View::Students);
            assert!(app.state.form.enrollment().is_none());
        }

        #[tokio::test]
        async fn test_enter_opens_selected_student() {
            let mut app = app();
            press(&mut app, KeyCode::Down).await;
            press(&mut app, KeyCode::Enter).await;
            assert_eq!(app.state.current_view, View::StudentDetail);
            assert_eq!(app.state.view_params.student_id, Some(2));
            press(&mut app, KeyCode::Esc).await;
            assert_eq!(app.state.current_view, View::Students);
        }

        #[tokio::test]
        async fn test_digit_shortcuts_switch_sections() {
            let mut app = app();
            press(&mut app, KeyCode::Char('2')).await;
            assert_eq!(app.state.current_view, View::Enrollment);
            assert_eq!(app.active_sidebar_index(), 1);
            // Digits are input inside the form
            press(&mut app, KeyCode::Char('1')).await;
            assert_eq!(app.state.current_view, View::Enrollment);
            assert_eq!(form(&app).values.name, "1");
        }

        #[test]
        fn test_open_section_to_students_clears_form() {
            let mut app = app();
            app.open_section(1);
            app.open_section(0);
            assert_eq!(app.state.current_view, View::Students);
            assert!(app.state.form.enrollment().is_none());
        }

        #[test]
        fn test_section_switches_keep_history_bounded() {
            let mut app = app();
            app.navigate(View::StudentDetail, ViewParams { student_id: Some(1) });
            for _ in 0..20 {
                app.open_section(1);
                app.open_section(0);
            }
            assert_eq!(app.state.view_history.len(), 1);
            app.open_section(1);
            app.go_back();
            assert_eq!(app.state.current_view, View::Students);
            assert!(app.state.view_history.is_empty());
        }

        #[tokio::test]
        async fn test_detail_scrolls() {
            let mut app = app();
            press(&mut app, KeyCode::Enter).await;
            press(&mut app, KeyCode::Char('j')).await;
            press(&mut app, KeyCode::Char('j')).await;
            press(&mut app, KeyCode::Char('k')).await;
            assert_eq!(app.state.scroll_offset, 1);
        }
    }

    mod enrollment {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_invalid_email_blocks_next() {
            let mut app = app();
            app.open_section(1);
            type_text(&mut app, "Jane Doe").await;
            press(&mut app, KeyCode::Tab).await;
            type_text(&mut app, "not-an-email").await;
            press(&mut app, KeyCode::Tab).await;
            press(&mut app, KeyCode::Up).await;
            app.handle_key(ctrl('n')).await.unwrap();

            let form = form(&app);
            assert_eq!(form.step, Step::PersonalInfo);
            assert_eq!(form.error(Field::Email).unwrap().message, "Invalid email");
            assert_eq!(form.active_input(), Some(Field::Email));
            assert!(app.status_message.is_none());
        }

        #[tokio::test]
        async fn test_date_picker_opens_at_boundary() {
            let mut app = app();
            app.open_section(1);
            press(&mut app, KeyCode::Tab).await;
            press(&mut app, KeyCode::Tab).await;
            press(&mut app, KeyCode::Up).await;
            assert_eq!(
                form(&app).values.date_of_birth,
                Some(latest_birth_date(fixed_today()))
            );
            // Cannot move past the boundary
            press(&mut app, KeyCode::Up).await;
            assert_eq!(
                form(&app).values.date_of_birth,
                Some(latest_birth_date(fixed_today()))
            );
            press(&mut app, KeyCode::Down).await;
            assert_eq!(
                form(&app).values.date_of_birth,
                NaiveDate::from_ymd_opt(2009, 10, 17)
            );
            press(&mut app, KeyCode::Backspace).await;
            assert_eq!(form(&app).values.date_of_birth, None);
        }

        #[tokio::test]
        async fn test_back_keeps_values() {
            let mut app = app();
            fill_to_files_step(&mut app).await;
            app.handle_key(ctrl('b')).await.unwrap();
            app.handle_key(ctrl('b')).await.unwrap();
            let form = form(&app);
            assert_eq!(form.step, Step::PersonalInfo);
            assert_eq!(form.values.name, "Jane Doe");
            assert_eq!(form.values.education, "BSc");
        }

        #[tokio::test]
        async fn test_back_on_first_step_sets_status() {
            let mut app = app();
            app.open_section(1);
            app.handle_key(ctrl('b')).await.unwrap();
            assert_eq!(form(&app).step, Step::PersonalInfo);
            assert_eq!(
                app.status_message.as_deref(),
                Some("already on the first step")
            );
        }

        #[tokio::test]
        async fn test_file_selection_replaces_previous() {
            let mut app = app();
            fill_to_files_step(&mut app).await;
            type_text(&mut app, "/tmp/a.pdf,/tmp/b.jpg").await;
            press(&mut app, KeyCode::Enter).await;
            assert_eq!(form(&app).values.file_names(), vec!["a.pdf", "b.jpg"]);
            type_text(&mut app, "/tmp/c.png").await;
            press(&mut app, KeyCode::Enter).await;
            assert_eq!(form(&app).values.file_names(), vec!["c.png"]);
        }

        #[tokio::test]
        async fn test_repeated_enter_keeps_files() {
            let mut app = app();
            fill_to_files_step(&mut app).await;
            type_text(&mut app, "/tmp/doc.pdf").await;
            press(&mut app, KeyCode::Enter).await;
            press(&mut app, KeyCode::Enter).await;
            let form = form(&app);
            assert_eq!(form.values.file_names(), vec!["doc.pdf"]);
            assert!(form.error(Field::Files).is_none());
        }

        #[tokio::test]
        async fn test_submit_without_files_never_sends() {
            let mut mock = MockEnrollmentTransport::new();
            mock.expect_send().times(0);
            let mut app = app_with(mock);
            fill_to_files_step(&mut app).await;

            app.handle_key(ctrl('s')).await.unwrap();

            let form = form(&app);
            assert_eq!(form.phase, SubmissionPhase::Editing);
            assert_eq!(
                form.error(Field::Files).unwrap().message,
                "At least one file is required"
            );
            assert!(!app.state.has_notice());
        }

        #[tokio::test]
        async fn test_jane_doe_end_to_end() {
            let mut mock = MockEnrollmentTransport::new();
            mock.expect_send()
                .times(1)
                .withf(|payload| {
                    payload.text("name") == Some("Jane Doe")
                        && payload.text("email") == Some("jane@example.com")
                        && payload.text("dob") == Some("2010-10-17T00:00:00.000Z")
                        && payload.text("address") == Some("1 Main St")
                        && payload.text("education") == Some("BSc")
                        && payload.files().len() == 1
                })
                .returning(|_| Ok(()));
            let mut app = app_with(mock);

            fill_to_files_step(&mut app).await;
            assert_eq!(form(&app).step, Step::Files);
            type_text(&mut app, "/tmp/transcript.pdf").await;
            press(&mut app, KeyCode::Enter).await;
            app.handle_key(ctrl('s')).await.unwrap();

            let notice = app.state.current_notice().unwrap();
            assert_eq!(notice.kind, NoticeKind::Success);
            assert_eq!(notice.message, "Form submitted successfully!");
            assert_eq!(form(&app).phase, SubmissionPhase::Submitted);

            // Modal swallows keys until dismissed
            app.handle_key(ctrl('s')).await.unwrap();
            press(&mut app, KeyCode::Enter).await;
            assert!(!app.state.has_notice());

            // Submitted form refuses a second submit
            app.handle_key(ctrl('s')).await.unwrap();
            assert!(!app.state.has_notice());
            assert_eq!(
                app.status_message.as_deref(),
                Some("the enrollment has already been submitted")
            );

            press(&mut app, KeyCode::Char('n')).await;
            let form = form(&app);
            assert_eq!(form.step, Step::PersonalInfo);
            assert_eq!(form.phase, SubmissionPhase::Editing);
            assert!(form.values.name.is_empty());
        }

        #[tokio::test]
        async fn test_failed_submission_keeps_values() {
            let mut mock = MockEnrollmentTransport::new();
            mock.expect_send()
                .times(1)
                .returning(|_| Err(SubmissionError::Rejected { status: 500 }));
            let mut app = app_with(mock);

            fill_to_files_step(&mut app).await;
            type_text(&mut app, "/tmp/transcript.pdf").await;
            press(&mut app, KeyCode::Enter).await;
            app.handle_key(ctrl('s')).await.unwrap();

            let notice = app.state.current_notice().unwrap();
            assert_eq!(notice.kind, NoticeKind::Error);
            assert_eq!(notice.message, "Submission failed");
            let form = form(&app);
            assert_eq!(form.phase, SubmissionPhase::Editing);
            assert_eq!(form.step, Step::Files);
            assert_eq!(form.values.file_names(), vec!["transcript.pdf"]);
        }

        #[test]
        fn test_button_row_submits() {
            let mut mock = MockEnrollmentTransport::new();
            mock.expect_send().times(1).returning(|_| Ok(()));
            let mut app = app_with(mock);

            tokio_test::block_on(async {
                fill_to_files_step(&mut app).await;
                type_text(&mut app, "/tmp/transcript.pdf").await;
                press(&mut app, KeyCode::Enter).await;
                // Focus the button row: files input, then buttons
                press(&mut app, KeyCode::Tab).await;
                assert!(form(&app).is_buttons_row_active());
                assert_eq!(form(&app).selected_form_button(), Some(FormButton::Submit));
                press(&mut app, KeyCode::Enter).await;
            });

            assert_eq!(form(&app).phase, SubmissionPhase::Submitted);
            assert_eq!(
                form(&app).selected_form_button(),
                Some(FormButton::NewEnrollment)
            );
        }

        #[test]
        fn test_unsupported_file_is_refused() {
            let mut app = app();
            tokio_test::block_on(async {
                fill_to_files_step(&mut app).await;
                type_text(&mut app, "/tmp/notes.txt").await;
                press(&mut app, KeyCode::Enter).await;
            });
            let form = form(&app);
            assert!(form.values.files.is_empty());
            assert_eq!(
                form.error(Field::Files).unwrap().message,
                "Only image or PDF files can be uploaded"
            );
        }
    }
}
