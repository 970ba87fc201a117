//! Validation rules for the enrollment record
//!
//! Every rule is a pure function of the record and the current date, so it
//! can be re-run on every keystroke or step transition without side effects.

use super::record::FormRecord;
use chrono::{Months, NaiveDate};
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

/// Youngest age at which an applicant may enroll
pub const MINIMUM_AGE_YEARS: u32 = 16;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern is a valid regex")
});

/// Fields of the enrollment record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    DateOfBirth,
    Address,
    Education,
    Files,
}

impl Field {
    #[cfg(test)]
    pub const ALL: [Field; 6] = [
        Field::Name,
        Field::Email,
        Field::DateOfBirth,
        Field::Address,
        Field::Education,
        Field::Files,
    ];

    /// Key used for this field in the submitted payload
    pub fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::DateOfBirth => "dob",
            Self::Address => "address",
            Self::Education => "education",
            Self::Files => "files",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::DateOfBirth => "Date of Birth",
            Self::Address => "Address",
            Self::Education => "Education",
            Self::Files => "Upload Files (Images or PDFs)",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Why a field failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    /// Empty, whitespace-only, unset or no files
    RequiredField,
    /// Non-empty but malformed
    Format,
    /// Well-formed but outside the allowed range
    OutOfRange,
}

/// A failed rule, attached to the field it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub kind: FieldErrorKind,
    pub message: &'static str,
}

impl FieldError {
    fn new(field: Field, kind: FieldErrorKind, message: &'static str) -> Self {
        Self {
            field,
            kind,
            message,
        }
    }

    fn required(field: Field) -> Self {
        let message = match field {
            Field::Name => "Name is required",
            Field::Email => "Email is required",
            Field::DateOfBirth => "Date of Birth is required",
            Field::Address => "Address is required",
            Field::Education => "Education is required",
            Field::Files => "At least one file is required",
        };
        Self::new(field, FieldErrorKind::RequiredField, message)
    }

    /// Refused file selection (only images and PDFs may be chosen)
    pub fn unsupported_file_type() -> Self {
        Self::new(
            Field::Files,
            FieldErrorKind::Format,
            "Only image or PDF files can be uploaded",
        )
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message)
    }
}

/// Errors keyed by field, in field order
pub type FieldErrors = BTreeMap<Field, FieldError>;

/// Latest birth date that still satisfies the minimum age, inclusive
pub fn latest_birth_date(today: NaiveDate) -> NaiveDate {
    today
        .checked_sub_months(Months::new(MINIMUM_AGE_YEARS * 12))
        .unwrap_or(NaiveDate::MIN)
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

fn require_text(field: Field, value: &str) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        Err(FieldError::required(field))
    } else {
        Ok(())
    }
}

/// Validate a single field of the record
pub fn validate_field(record: &FormRecord, field: Field, today: NaiveDate) -> Result<(), FieldError> {
    match field {
        Field::Name => require_text(field, &record.name),
        Field::Address => require_text(field, &record.address),
        Field::Education => require_text(field, &record.education),
        Field::Email => {
            require_text(field, &record.email)?;
            if is_valid_email(&record.email) {
                Ok(())
            } else {
                Err(FieldError::new(field, FieldErrorKind::Format, "Invalid email"))
            }
        }
        Field::DateOfBirth => match record.date_of_birth {
            None => Err(FieldError::required(field)),
            Some(dob) if dob > latest_birth_date(today) => Err(FieldError::new(
                field,
                FieldErrorKind::OutOfRange,
                "Applicant must be at least 16 years old",
            )),
            Some(_) => Ok(()),
        },
        Field::Files => {
            if record.files.is_empty() {
                Err(FieldError::required(field))
            } else {
                Ok(())
            }
        }
    }
}

/// Validate a subset of fields, returning the failures
pub fn validate_fields(record: &FormRecord, fields: &[Field], today: NaiveDate) -> FieldErrors {
    fields
        .iter()
        .filter_map(|&field| validate_field(record, field, today).err())
        .map(|err| (err.field, err))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::Attachment;
    use pretty_assertions::assert_eq;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    fn validate_all(record: &FormRecord) -> FieldErrors {
        validate_fields(record, &Field::ALL, today())
    }

    fn complete_record() -> FormRecord {
        FormRecord {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2009, 10, 17),
            address: "1 Main St".to_string(),
            education: "BSc".to_string(),
            files: vec![Attachment::from_path("doc.pdf")],
        }
    }

    #[test]
    fn test_complete_record_is_valid() {
        assert!(validate_all(&complete_record()).is_empty());
    }

    #[test]
    fn test_empty_record_fails_every_field_as_required() {
        let errors = validate_all(&FormRecord::default());
        assert_eq!(errors.len(), 6);
        assert!(errors
            .values()
            .all(|e| e.kind == FieldErrorKind::RequiredField));
        assert_eq!(errors[&Field::Files].message, "At least one file is required");
    }

    #[test]
    fn test_whitespace_only_text_is_required() {
        let mut record = complete_record();
        record.name = "   ".to_string();
        record.education = "\t".to_string();
        let errors = validate_all(&record);
        assert_eq!(
            errors.keys().copied().collect::<Vec<_>>(),
            vec![Field::Name, Field::Education]
        );
        assert_eq!(errors[&Field::Name].message, "Name is required");
    }

    #[test]
    fn test_malformed_email_is_format_error() {
        let mut record = complete_record();
        record.email = "not-an-email".to_string();
        let err = validate_field(&record, Field::Email, today()).unwrap_err();
        assert_eq!(err.kind, FieldErrorKind::Format);
        assert_eq!(err.message, "Invalid email");
    }

    #[test]
    fn test_empty_email_is_required_not_format() {
        let mut record = complete_record();
        record.email.clear();
        let err = validate_field(&record, Field::Email, today()).unwrap_err();
        assert_eq!(err.kind, FieldErrorKind::RequiredField);
        assert_eq!(err.message, "Email is required");
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("jane@example.com"));
        assert!(is_valid_email("first.last+tag@sub.example.co.nz"));
        assert!(!is_valid_email("jane@"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("jane doe@example.com"));
        assert!(!is_valid_email("jane@-example.com"));
    }

    #[test]
    fn test_latest_birth_date_is_sixteen_years_back() {
        assert_eq!(
            latest_birth_date(today()),
            NaiveDate::from_ymd_opt(2010, 10, 17).unwrap()
        );
    }

    #[test]
    fn test_latest_birth_date_clamps_leap_day() {
        let leap_day = NaiveDate::from_ymd_opt(2116, 2, 29).unwrap();
        assert_eq!(
            latest_birth_date(leap_day),
            NaiveDate::from_ymd_opt(2100, 2, 28).unwrap()
        );
    }

    #[test]
    fn test_birth_date_on_boundary_is_accepted() {
        let mut record = complete_record();
        record.date_of_birth = Some(latest_birth_date(today()));
        assert!(validate_field(&record, Field::DateOfBirth, today()).is_ok());
    }

    #[test]
    fn test_birth_date_one_day_past_boundary_is_rejected() {
        let mut record = complete_record();
        record.date_of_birth = latest_birth_date(today()).succ_opt();
        let err = validate_field(&record, Field::DateOfBirth, today()).unwrap_err();
        assert_eq!(err.kind, FieldErrorKind::OutOfRange);
    }

    #[test]
    fn test_missing_birth_date_is_required() {
        let mut record = complete_record();
        record.date_of_birth = None;
        let err = validate_field(&record, Field::DateOfBirth, today()).unwrap_err();
        assert_eq!(err.kind, FieldErrorKind::RequiredField);
    }

    #[test]
    fn test_validate_fields_only_checks_subset() {
        let mut record = FormRecord::default();
        record.name = "Jane".to_string();
        let errors = validate_fields(&record, &[Field::Name, Field::Address], today());
        assert_eq!(errors.keys().copied().collect::<Vec<_>>(), vec![Field::Address]);
    }

    #[test]
    fn test_validation_does_not_mutate_record() {
        let record = FormRecord::default();
        let before = record.clone();
        let _ = validate_all(&record);
        let _ = validate_all(&record);
        assert_eq!(record, before);
    }

    #[test]
    fn test_field_keys_match_payload_names() {
        let keys: Vec<_> = Field::ALL.iter().map(|f| f.key()).collect();
        assert_eq!(keys, vec!["name", "email", "dob", "address", "education", "files"]);
    }
}
