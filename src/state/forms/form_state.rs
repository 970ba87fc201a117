//! Form state management and the enrollment wizard

use super::field::{DatePicker, FileChooser};
use super::record::{Attachment, FormRecord};
use super::schema::{self, Field, FieldError, FieldErrors};
use super::step::{Step, SubmissionPhase, TransitionError};
use chrono::NaiveDate;

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
}

/// Enum representing all possible form states
#[derive(Debug, Clone, Default)]
pub enum FormState {
    #[default]
    None,
    Enrollment(EnrollmentForm),
}

impl FormState {
    pub fn next_field(&mut self) {
        match self {
            FormState::None => {}
            FormState::Enrollment(f) => f.next_field(),
        }
    }

    pub fn prev_field(&mut self) {
        match self {
            FormState::None => {}
            FormState::Enrollment(f) => f.prev_field(),
        }
    }

    pub fn enrollment(&self) -> Option<&EnrollmentForm> {
        match self {
            FormState::Enrollment(f) => Some(f),
            FormState::None => None,
        }
    }

    pub fn enrollment_mut(&mut self) -> Option<&mut EnrollmentForm> {
        match self {
            FormState::Enrollment(f) => Some(f),
            FormState::None => None,
        }
    }
}

/// Buttons shown under the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormButton {
    Back,
    Next,
    Submit,
    NewEnrollment,
}

impl FormButton {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Back => "Back",
            Self::Next => "Next",
            Self::Submit => "Submit",
            Self::NewEnrollment => "New Enrollment",
        }
    }
}

/// Three-step enrollment wizard.
///
/// `values` is the single source of truth for every step; switching steps
/// never resets it. `errors` holds the latest result for each field that
/// has been validated.
#[derive(Debug, Clone, Default)]
pub struct EnrollmentForm {
    pub values: FormRecord,
    pub step: Step,
    pub errors: FieldErrors,
    pub phase: SubmissionPhase,
    /// Focused input within the step; one past the last input is the button row
    pub active_field_index: usize,
    pub selected_button: usize,
    pub date_picker: DatePicker,
    pub file_chooser: FileChooser,
}

impl EnrollmentForm {
    pub fn new() -> Self {
        let mut form = Self::default();
        form.selected_button = form.primary_button_index();
        form
    }

    /// Inputs shown on the current step
    pub fn inputs(&self) -> &'static [Field] {
        self.step.fields()
    }

    /// Field with keyboard focus, `None` when the button row is focused
    pub fn active_input(&self) -> Option<Field> {
        self.inputs().get(self.active_field_index).copied()
    }

    pub fn is_buttons_row_active(&self) -> bool {
        self.active_input().is_none()
    }

    /// Whether edits and transitions are currently refused
    pub fn is_locked(&self) -> bool {
        self.phase != SubmissionPhase::Editing
    }

    pub fn error(&self, field: Field) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    /// Buttons available for the current step and phase
    pub fn buttons(&self) -> Vec<FormButton> {
        if self.phase == SubmissionPhase::Submitted {
            return vec![FormButton::NewEnrollment];
        }
        let mut buttons = Vec::with_capacity(2);
        if !self.step.is_first() {
            buttons.push(FormButton::Back);
        }
        if self.step.is_last() {
            buttons.push(FormButton::Submit);
        } else {
            buttons.push(FormButton::Next);
        }
        buttons
    }

    fn primary_button_index(&self) -> usize {
        self.buttons().len().saturating_sub(1)
    }

    pub fn selected_form_button(&self) -> Option<FormButton> {
        self.buttons().get(self.selected_button).copied()
    }

    pub fn next_button(&mut self) {
        let count = self.buttons().len();
        self.selected_button = (self.selected_button + 1) % count;
    }

    pub fn prev_button(&mut self) {
        let count = self.buttons().len();
        if self.selected_button == 0 {
            self.selected_button = count - 1;
        } else {
            self.selected_button -= 1;
        }
    }

    fn reset_focus(&mut self) {
        self.active_field_index = 0;
        self.selected_button = self.primary_button_index();
    }

    /// Re-run a field's rule if it is currently flagged, so a fixed value
    /// clears its message as soon as it is edited
    fn revalidate_if_flagged(&mut self, field: Field, today: NaiveDate) {
        if !self.errors.contains_key(&field) {
            return;
        }
        match schema::validate_field(&self.values, field, today) {
            Ok(()) => {
                self.errors.remove(&field);
            }
            Err(err) => {
                self.errors.insert(field, err);
            }
        }
    }

    /// Validate `fields`, replacing their previous results
    fn trigger(&mut self, fields: &[Field], today: NaiveDate) -> Vec<Field> {
        for field in fields {
            self.errors.remove(field);
        }
        let failed = schema::validate_fields(&self.values, fields, today);
        let invalid: Vec<Field> = failed.keys().copied().collect();
        self.errors.extend(failed);
        invalid
    }

    /// Replace a free-text value
    #[cfg(test)]
    pub fn set_text(&mut self, field: Field, value: impl Into<String>, today: NaiveDate) {
        if self.is_locked() {
            return;
        }
        if let Some(text) = self.values.text_mut(field) {
            *text = value.into();
            self.revalidate_if_flagged(field, today);
        }
    }

    pub fn set_date_of_birth(&mut self, date: Option<NaiveDate>, today: NaiveDate) {
        if self.is_locked() {
            return;
        }
        self.values.date_of_birth = date;
        self.revalidate_if_flagged(Field::DateOfBirth, today);
    }

    /// Replace the whole file selection
    pub fn select_files(&mut self, files: Vec<Attachment>, today: NaiveDate) {
        if self.is_locked() {
            return;
        }
        self.values.set_files(files);
        self.errors.remove(&Field::Files);
        if let Err(err) = schema::validate_field(&self.values, Field::Files, today) {
            self.errors.insert(Field::Files, err);
        }
    }

    /// Type a character into the focused input
    pub fn input_char(&mut self, c: char, today: NaiveDate) {
        if self.is_locked() {
            return;
        }
        match self.active_input() {
            Some(Field::Files) => self.file_chooser.push_char(c),
            Some(Field::DateOfBirth) | None => {}
            Some(field) => {
                if let Some(text) = self.values.text_mut(field) {
                    text.push(c);
                }
                self.revalidate_if_flagged(field, today);
            }
        }
    }

    /// Delete backwards in the focused input; clears the date picker
    pub fn backspace(&mut self, today: NaiveDate) {
        if self.is_locked() {
            return;
        }
        match self.active_input() {
            Some(Field::Files) => self.file_chooser.pop_char(),
            Some(Field::DateOfBirth) => self.set_date_of_birth(None, today),
            None => {}
            Some(field) => {
                if let Some(text) = self.values.text_mut(field) {
                    text.pop();
                }
                self.revalidate_if_flagged(field, today);
            }
        }
    }

    /// Move the date of birth by `delta` units of the picker's segment
    pub fn shift_date(&mut self, delta: i32, today: NaiveDate) {
        let max = schema::latest_birth_date(today);
        let date = self.date_picker.shift(self.values.date_of_birth, delta, max);
        self.set_date_of_birth(Some(date), today);
    }

    /// Commit the paths typed into the file chooser as the new selection.
    /// A blank input keeps the current selection.
    pub fn confirm_file_selection(&mut self, today: NaiveDate) {
        if self.is_locked() || self.file_chooser.input.trim().is_empty() {
            return;
        }
        match self.file_chooser.selection() {
            Ok(files) => {
                self.select_files(files, today);
                self.file_chooser.clear();
            }
            Err(err) => {
                tracing::warn!("File selection refused: {err}");
                self.errors
                    .insert(Field::Files, FieldError::unsupported_file_type());
            }
        }
    }

    fn ensure_editing(&self) -> Result<(), TransitionError> {
        match self.phase {
            SubmissionPhase::Editing => Ok(()),
            SubmissionPhase::Submitting => Err(TransitionError::AlreadySubmitting),
            SubmissionPhase::Submitted => Err(TransitionError::AlreadySubmitted),
        }
    }

    /// Advance if the current step's fields validate
    pub fn next(&mut self, today: NaiveDate) -> Result<Step, TransitionError> {
        self.ensure_editing()?;
        let next = self.step.next().ok_or(TransitionError::NoNextStep)?;

        let invalid = self.trigger(self.step.fields(), today);
        if let Some(first) = invalid.first() {
            if let Some(index) = self.inputs().iter().position(|f| f == first) {
                self.active_field_index = index;
            }
            return Err(TransitionError::Invalid {
                step: self.step,
                fields: invalid,
            });
        }

        self.step = next;
        self.reset_focus();
        Ok(next)
    }

    /// Go back one step without validating
    pub fn back(&mut self) -> Result<Step, TransitionError> {
        self.ensure_editing()?;
        let prev = self.step.prev().ok_or(TransitionError::NoPreviousStep)?;
        self.step = prev;
        self.reset_focus();
        Ok(prev)
    }

    /// Gate the final step and hand out the record to send.
    ///
    /// Earlier steps are not re-checked; they were validated when the user
    /// advanced past them. Moves the form into `Submitting` until
    /// [`finish_submit`](Self::finish_submit) is called.
    pub fn begin_submit(&mut self, today: NaiveDate) -> Result<FormRecord, TransitionError> {
        self.ensure_editing()?;
        if !self.step.is_last() {
            return Err(TransitionError::NotOnFinalStep);
        }

        let invalid = self.trigger(self.step.fields(), today);
        if !invalid.is_empty() {
            return Err(TransitionError::Invalid {
                step: self.step,
                fields: invalid,
            });
        }

        self.phase = SubmissionPhase::Submitting;
        Ok(self.values.clone())
    }

    /// Record the result of the in-flight submission
    pub fn finish_submit(&mut self, succeeded: bool) {
        if self.phase != SubmissionPhase::Submitting {
            return;
        }
        if succeeded {
            self.phase = SubmissionPhase::Submitted;
            self.selected_button = 0;
            self.active_field_index = self.inputs().len();
        } else {
            self.phase = SubmissionPhase::Editing;
        }
    }

    /// Start over with an empty record
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Form for EnrollmentForm {
    fn field_count(&self) -> usize {
        self.inputs().len() + 1 // inputs + buttons row
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.inputs().len());
    }
}
