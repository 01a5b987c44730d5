//! Network side of the form: posting a payload to the submit endpoint.

use std::time::Duration;

use async_trait::async_trait;
use survey_core::{defaults, SubmissionPayload};
use thiserror::Error;

/// Default request timeout for the HTTP transport.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Status and raw body text of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request did not complete.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{0}")]
    Network(String),

    #[error("Invalid server URL: {0}")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        TransportError::Network(e.to_string())
    }
}

/// Sends a submission payload somewhere and reports the raw answer.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_json(
        &self,
        payload: &SubmissionPayload,
    ) -> Result<TransportResponse, TransportError>;
}

/// Posts payloads to `<server>/api/submit` with reqwest.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(server: &str) -> Result<Self, TransportError> {
        Self::with_timeout(server, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(server: &str, timeout: Duration) -> Result<Self, TransportError> {
        let server = server.trim_end_matches('/');
        if !server.starts_with("http://") && !server.starts_with("https://") {
            return Err(TransportError::InvalidUrl(server.to_string()));
        }

        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}{}", server, defaults::SUBMIT_PATH),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(
        &self,
        payload: &SubmissionPayload,
    ) -> Result<TransportResponse, TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        tracing::debug!(status, endpoint = %self.endpoint, "Submission posted");

        Ok(TransportResponse { status, body })
    }
}
