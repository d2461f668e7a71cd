//! # Feishu Delivery
//!
//! Outbound HTTP client for posting card messages to a Feishu incoming
//! webhook.
//!
//! The client performs exactly one POST per call. Failures are terminal for
//! the request being relayed: a non-2xx response or a network-level error is
//! reported back to the caller, never retried.

pub mod sign;

pub use sign::{card_signature, SigningError};

use crate::card::CardMessage;
use chrono::Utc;
use std::time::Duration;
use tracing::{debug, error};

/// Configuration for Feishu delivery behavior.
#[derive(Debug, Clone)]
pub struct FeishuClientConfig {
    /// Destination incoming-webhook URL.
    pub webhook_url: String,
    /// Bot secret for outbound signing. When `None`, messages are sent
    /// unsigned and the `timestamp` / `sign` fields are omitted.
    pub secret: Option<String>,
    /// Total request timeout for the downstream call.
    pub timeout: Duration,
}

impl Default for FeishuClientConfig {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            secret: None,
            timeout: Duration::from_secs(10),
        }
    }
}

impl FeishuClientConfig {
    /// Set the destination webhook URL.
    pub fn with_webhook_url(mut self, webhook_url: impl Into<String>) -> Self {
        self.webhook_url = webhook_url.into();
        self
    }

    /// Set the outbound signing secret.
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// HTTP client for a Feishu incoming webhook.
pub struct FeishuClient {
    http: reqwest::Client,
    webhook_url: String,
    secret: Option<String>,
}

impl FeishuClient {
    /// Create a new client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError::ClientBuild`] if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(config: FeishuClientConfig) -> Result<Self, DeliveryError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DeliveryError::ClientBuild {
                message: e.to_string(),
            })?;

        Ok(Self {
            http,
            webhook_url: config.webhook_url,
            secret: config.secret,
        })
    }

    /// Deliver a card message to the configured webhook.
    ///
    /// When a secret is configured the message is signed with the current
    /// unix timestamp before sending.
    ///
    /// # Errors
    ///
    /// * [`DeliveryError::Rejected`] - Feishu answered with a non-success
    ///   HTTP status
    /// * [`DeliveryError::Network`] - timeout, DNS failure, connection
    ///   refused
    pub async fn deliver(&self, message: CardMessage) -> Result<(), DeliveryError> {
        let message = match &self.secret {
            Some(secret) => {
                let timestamp = Utc::now().timestamp();
                let sign = card_signature(secret, timestamp)?;
                message.with_signature(timestamp.to_string(), sign)
            }
            None => message,
        };

        let response = self
            .http
            .post(&self.webhook_url)
            .json(&message)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), "Feishu rejected the message");
            return Err(DeliveryError::Rejected {
                status: status.as_u16(),
                body: truncate_body(body),
            });
        }

        debug!("Delivered card message to Feishu");
        Ok(())
    }
}

// Security: don't expose the secret in debug output
impl std::fmt::Debug for FeishuClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeishuClient")
            .field("webhook_url", &self.webhook_url)
            .field("secret", &"<REDACTED>")
            .finish()
    }
}

/// Cap the response body snippet carried in [`DeliveryError::Rejected`].
fn truncate_body(body: String) -> String {
    const MAX_LEN: usize = 512;
    if body.len() <= MAX_LEN {
        return body;
    }
    let mut end = MAX_LEN;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    body[..end].to_string()
}

/// Delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("failed to build HTTP client: {message}")]
    ClientBuild { message: String },

    #[error("failed to send message to Feishu: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Feishu rejected the message: HTTP {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("failed to sign message: {0}")]
    Signing(#[from] SigningError),
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
