//! HTTP client for posting enrollments

use super::{EnrollmentPayload, EnrollmentTransport, SubmissionError};
use crate::config::TuiConfig;
use async_trait::async_trait;

/// Posts multipart enrollments to a fixed endpoint
pub struct HttpTransport {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Create a transport for the endpoint resolved from the config
    pub fn from_config(config: &TuiConfig) -> Self {
        Self::new(config.submit_url())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl EnrollmentTransport for HttpTransport {
    async fn send(&self, payload: EnrollmentPayload) -> Result<(), SubmissionError> {
        let form = payload.into_multipart().await?;

        let response = self.http.post(&self.endpoint).multipart(form).send().await?;

        let status = response.status();
        tracing::debug!("Submission to {} returned {}", self.endpoint, status);
        if status.is_success() {
            Ok(())
        } else {
            Err(SubmissionError::Rejected {
                status: status.as_u16(),
            })
        }
    }
}
