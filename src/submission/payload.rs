//! Multipart payload built from an enrollment record

use super::SubmissionError;
use crate::state::{Attachment, Field, FormRecord};
use chrono::{NaiveDate, SecondsFormat};
use reqwest::multipart::{Form, Part};

/// Value of one multipart part
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartValue {
    Text(String),
    File(Attachment),
}

/// Ordered `(key, value)` parts of an enrollment submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentPayload {
    parts: Vec<(&'static str, PartValue)>,
}

/// Encode a birth date as the ISO-8601 UTC instant of its midnight,
/// e.g. `2009-10-17T00:00:00.000Z`; empty when unset
pub fn encode_date_of_birth(date: Option<NaiveDate>) -> String {
    date.and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_default()
}

impl EnrollmentPayload {
    pub fn from_record(record: &FormRecord) -> Self {
        let text = |field: Field, value: String| (field.key(), PartValue::Text(value));

        let mut parts = vec![
            text(Field::Name, record.name.clone()),
            text(Field::Email, record.email.clone()),
            text(Field::DateOfBirth, encode_date_of_birth(record.date_of_birth)),
            text(Field::Address, record.address.clone()),
            text(Field::Education, record.education.clone()),
        ];
        parts.extend(
            record
                .files
                .iter()
                .map(|f| (Field::Files.key(), PartValue::File(f.clone()))),
        );

        Self { parts }
    }

    pub fn parts(&self) -> &[(&'static str, PartValue)] {
        &self.parts
    }

    /// First text part stored under `key`
    pub fn text(&self, key: &str) -> Option<&str> {
        self.parts.iter().find_map(|(k, v)| match v {
            PartValue::Text(s) if *k == key => Some(s.as_str()),
            _ => None,
        })
    }

    /// Attachments in the order they will be sent
    pub fn files(&self) -> Vec<&Attachment> {
        self.parts
            .iter()
            .filter_map(|(_, v)| match v {
                PartValue::File(a) => Some(a),
                PartValue::Text(_) => None,
            })
            .collect()
    }

    /// Read attachment contents and build the multipart body
    pub async fn into_multipart(self) -> Result<Form, SubmissionError> {
        let mut form = Form::new();
        for (key, value) in self.parts {
            form = match value {
                PartValue::Text(text) => form.text(key, text),
                PartValue::File(attachment) => {
                    let bytes = tokio::fs::read(&attachment.path).await.map_err(|source| {
                        SubmissionError::Attachment {
                            name: attachment.name.clone(),
                            source,
                        }
                    })?;
                    let part = Part::bytes(bytes)
                        .file_name(attachment.name.clone())
                        .mime_str(attachment.content_type())?;
                    form.part(key, part)
                }
            };
        }
        Ok(form)
    }
}
