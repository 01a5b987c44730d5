//! Best-effort forwarding of accepted submissions to an external webhook.
//!
//! One POST per submission, no retries. Delivery outcomes are logged and never
//! reach the submitter.

use std::time::Duration;

use survey_core::{NormalizedRecord, WebhookEnvelope};
use tokio::task::JoinHandle;

use crate::config::ServerConfig;

/// Result of a single delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// Target answered with a 2xx status.
    Delivered(u16),
    /// Target answered with a non-2xx status.
    Rejected(u16),
    /// Request never completed (connect error, timeout, ...).
    Failed(String),
}

impl DeliveryOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, DeliveryOutcome::Delivered(_))
    }
}

/// Posts `survey.submission` envelopes to a fixed URL.
#[derive(Clone, Debug)]
pub struct WebhookForwarder {
    client: reqwest::Client,
    url: String,
}

impl WebhookForwarder {
    /// Create a forwarder whose requests give up after `timeout`.
    pub fn new(url: impl Into<String>, timeout: Duration) -> survey_core::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Build the forwarder described by `config`, or `None` when forwarding
    /// is disabled.
    pub fn from_config(config: &ServerConfig) -> survey_core::Result<Option<Self>> {
        config
            .webhook_url
            .as_ref()
            .map(|url| Self::new(url.clone(), config.webhook_timeout))
            .transpose()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Deliver one record and report what happened.
    ///
    /// The response body is not read.
    pub async fn forward(&self, record: &NormalizedRecord) -> DeliveryOutcome {
        let envelope = WebhookEnvelope::submission(record.clone());

        let outcome = match self.client.post(&self.url).json(&envelope).send().await {
            Ok(response) if response.status().is_success() => {
                DeliveryOutcome::Delivered(response.status().as_u16())
            }
            Ok(response) => DeliveryOutcome::Rejected(response.status().as_u16()),
            Err(e) => DeliveryOutcome::Failed(e.to_string()),
        };

        match &outcome {
            DeliveryOutcome::Delivered(status) => {
                tracing::debug!(status = *status, "Webhook delivered");
            }
            DeliveryOutcome::Rejected(status) => {
                tracing::warn!(status = *status, "Webhook forwarding rejected");
            }
            DeliveryOutcome::Failed(error) => {
                tracing::warn!(error = %error, "Webhook forwarding failed");
            }
        }

        outcome
    }

    /// Deliver `record` on a detached task.
    ///
    /// Callers may drop the handle; the task still runs to completion or
    /// timeout.
    pub fn dispatch(&self, record: NormalizedRecord) -> JoinHandle<DeliveryOutcome> {
        let forwarder = self.clone();
        tokio::spawn(async move { forwarder.forward(&record).await })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_disabled_without_url() {
        let forwarder = WebhookForwarder::from_config(&ServerConfig::default()).unwrap();
        assert!(forwarder.is_none());
    }

    #[test]
    fn test_from_config_uses_url() {
        let config = ServerConfig {
            webhook_url: Some("http://127.0.0.1:9/hook".to_string()),
            ..ServerConfig::default()
        };
        let forwarder = WebhookForwarder::from_config(&config).unwrap().unwrap();
        assert_eq!(forwarder.url(), "http://127.0.0.1:9/hook");
    }

    #[test]
    fn test_outcome_success_flag() {
        assert!(DeliveryOutcome::Delivered(204).is_success());
        assert!(!DeliveryOutcome::Rejected(500).is_success());
        assert!(!DeliveryOutcome::Failed("timeout".into()).is_success());
    }
}
