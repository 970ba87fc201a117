//! Wizard steps and transition errors

use super::schema::Field;
use std::fmt;
use thiserror::Error;

/// Linear steps of the enrollment wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Step {
    #[default]
    PersonalInfo,
    Education,
    Files,
}

impl Step {
    pub const ALL: [Step; 3] = [Step::PersonalInfo, Step::Education, Step::Files];

    pub fn index(self) -> usize {
        match self {
            Self::PersonalInfo => 0,
            Self::Education => 1,
            Self::Files => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::PersonalInfo => "Personal Info",
            Self::Education => "Education",
            Self::Files => "Upload Files",
        }
    }

    /// Fields that must validate before leaving this step
    pub fn fields(self) -> &'static [Field] {
        match self {
            Self::PersonalInfo => &[Field::Name, Field::Email, Field::DateOfBirth],
            Self::Education => &[Field::Address, Field::Education],
            Self::Files => &[Field::Files],
        }
    }

    pub fn next(self) -> Option<Step> {
        match self {
            Self::PersonalInfo => Some(Self::Education),
            Self::Education => Some(Self::Files),
            Self::Files => None,
        }
    }

    pub fn prev(self) -> Option<Step> {
        match self {
            Self::PersonalInfo => None,
            Self::Education => Some(Self::PersonalInfo),
            Self::Files => Some(Self::Education),
        }
    }

    pub fn is_first(self) -> bool {
        self.prev().is_none()
    }

    pub fn is_last(self) -> bool {
        self.next().is_none()
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where the enrollment is in its submission lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionPhase {
    #[default]
    Editing,
    /// A submission is in flight; further submits are refused
    Submitting,
    /// Accepted by the server; the form is read-only until reset
    Submitted,
}

/// Reasons a wizard transition was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("{step} step has invalid fields: {}", format_fields(.fields))]
    Invalid { step: Step, fields: Vec<Field> },

    #[error("already on the first step")]
    NoPreviousStep,

    #[error("already on the last step")]
    NoNextStep,

    #[error("submit is only available on the {} step", Step::Files)]
    NotOnFinalStep,

    #[error("a submission is already in flight")]
    AlreadySubmitting,

    #[error("the enrollment has already been submitted")]
    AlreadySubmitted,
}

fn format_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|f| f.key())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_personal_info() {
        assert_eq!(Step::default(), Step::PersonalInfo);
        assert_eq!(Step::default().index(), 0);
    }

    #[test]
    fn test_steps_are_linear() {
        assert_eq!(Step::PersonalInfo.next(), Some(Step::Education));
        assert_eq!(Step::Education.next(), Some(Step::Files));
        assert_eq!(Step::Files.next(), None);
        assert_eq!(Step::Files.prev(), Some(Step::Education));
        assert_eq!(Step::PersonalInfo.prev(), None);
    }

    #[test]
    fn test_step_field_assignment() {
        assert_eq!(
            Step::PersonalInfo.fields(),
            &[Field::Name, Field::Email, Field::DateOfBirth]
        );
        assert_eq!(Step::Education.fields(), &[Field::Address, Field::Education]);
        assert_eq!(Step::Files.fields(), &[Field::Files]);
    }

    #[test]
    fn test_every_field_belongs_to_exactly_one_step() {
        for field in Field::ALL {
            let owners = Step::ALL
                .iter()
                .filter(|s| s.fields().contains(&field))
                .count();
            assert_eq!(owners, 1, "{field} should belong to one step");
        }
    }

    #[test]
    fn test_invalid_error_lists_fields() {
        let err = TransitionError::Invalid {
            step: Step::PersonalInfo,
            fields: vec![Field::Email, Field::DateOfBirth],
        };
        assert_eq!(
            err.to_string(),
            "Personal Info step has invalid fields: email, dob"
        );
    }
}
