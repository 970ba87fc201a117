//! Form domain layer
//!
//! Type-safe enrollment record, its validation schema, the step controller
//! and the input widgets, all independent of rendering.

mod field;
mod form_state;
mod record;
mod schema;
mod step;

pub use field::format_date;
pub use form_state::{EnrollmentForm, FormButton, FormState};
pub use record::{Attachment, FormRecord};
pub use schema::{Field, FieldError};
pub use step::{Step, SubmissionPhase, TransitionError};

#[cfg(test)]
pub use schema::latest_birth_date;
