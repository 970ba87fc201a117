//! Trait abstraction for the submission transport to enable mocking in tests

use super::{EnrollmentPayload, SubmissionError};
use async_trait::async_trait;

/// Sends an enrollment payload in a single request
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentTransport: Send + Sync {
    /// POST the payload once; `Ok` only for a success status
    async fn send(&self, payload: EnrollmentPayload) -> Result<(), SubmissionError>;
}
