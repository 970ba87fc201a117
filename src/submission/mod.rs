//! Enrollment submission: multipart payload, HTTP transport and outcome reporting

mod client;
mod payload;
mod traits;

pub use client::HttpTransport;
pub use payload::EnrollmentPayload;
pub use traits::EnrollmentTransport;

#[cfg(test)]
pub use traits::MockEnrollmentTransport;

use crate::state::FormRecord;
use thiserror::Error;

/// Message shown after the endpoint accepted the enrollment
pub const SUCCESS_MESSAGE: &str = "Form submitted successfully!";
/// Message shown when the endpoint answered with a non-success status
pub const REJECTED_MESSAGE: &str = "Submission failed";
/// Message shown when the request could not be completed
pub const FAILURE_MESSAGE: &str = "An error occurred.";

/// Errors raised while sending an enrollment
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("endpoint rejected submission with status {status}")]
    Rejected { status: u16 },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("could not read attachment {name}: {source}")]
    Attachment {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

impl SubmissionError {
    /// User-facing message for this failure
    pub fn user_message(&self) -> &'static str {
        match self {
            SubmissionError::Rejected { .. } => REJECTED_MESSAGE,
            SubmissionError::Transport(_) | SubmissionError::Attachment { .. } => FAILURE_MESSAGE,
        }
    }
}

/// Result of one submission attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Succeeded,
    Failed { message: &'static str },
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Succeeded)
    }

    pub fn message(&self) -> &'static str {
        match self {
            SubmissionOutcome::Succeeded => SUCCESS_MESSAGE,
            SubmissionOutcome::Failed { message } => *message,
        }
    }
}

/// Send a validated record exactly once and classify the result
pub async fn submit_enrollment(
    transport: &dyn EnrollmentTransport,
    record: &FormRecord,
) -> SubmissionOutcome {
    let payload = EnrollmentPayload::from_record(record);
    tracing::info!(
        "Submitting enrollment for {} with {} attachment(s)",
        payload.text("name").unwrap_or_default(),
        payload.files().len()
    );
    tracing::debug!("Encoded {} multipart parts", payload.parts().len());

    match transport.send(payload).await {
        Ok(()) => {
            tracing::info!("Enrollment accepted");
            SubmissionOutcome::Succeeded
        }
        Err(err @ SubmissionError::Rejected { .. }) => {
            tracing::warn!("Enrollment rejected: {err}");
            SubmissionOutcome::Failed {
                message: err.user_message(),
            }
        }
        Err(err) => {
            tracing::error!("Error submitting enrollment: {err}");
            SubmissionOutcome::Failed {
                message: err.user_message(),
            }
        }
    }
}
