//! # Webhook Request Capture
//!
//! Types describing an inbound GitHub webhook request: the relevant HTTP
//! headers and the raw payload bytes.
//!
//! The raw body is held as [`Bytes`] exactly as received on the wire.
//! Signature verification consumes these bytes directly; the payload is never
//! re-serialized before verification, since any non-canonical JSON formatting
//! would change the computed HMAC.

mod signature;

pub use signature::{HmacSha256Validator, SignatureError, SignatureValidator};

use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

// ============================================================================
// Core Types
// ============================================================================

/// Raw HTTP request data from a GitHub webhook delivery.
#[derive(Debug, Clone)]
pub struct WebhookRequest {
    pub headers: WebhookHeaders,
    pub body: Bytes,
    pub received_at: DateTime<Utc>,
}

impl WebhookRequest {
    /// Create a new webhook request from parsed headers and the raw body.
    pub fn new(headers: WebhookHeaders, body: Bytes) -> Self {
        Self {
            headers,
            body,
            received_at: Utc::now(),
        }
    }

    /// Get the event type from the headers.
    pub fn event_type(&self) -> &str {
        &self.headers.event_type
    }

    /// Get the delivery ID from the headers if present.
    pub fn delivery_id(&self) -> Option<&str> {
        self.headers.delivery_id.as_deref()
    }

    /// Get the signature header value if present.
    pub fn signature(&self) -> Option<&str> {
        self.headers.signature.as_deref()
    }
}

/// GitHub-specific HTTP headers required for processing.
#[derive(Debug, Clone)]
pub struct WebhookHeaders {
    pub event_type: String,         // X-GitHub-Event
    pub delivery_id: Option<String>, // X-GitHub-Delivery
    pub signature: Option<String>,  // X-Hub-Signature-256
    pub content_type: String,       // Content-Type
}

impl WebhookHeaders {
    /// Parse headers from an HTTP header map.
    ///
    /// Only `X-GitHub-Event` is required. The signature header is optional
    /// because verification is only performed when a webhook secret is
    /// configured; the delivery ID is carried for log correlation only.
    pub fn from_http_headers(headers: &HashMap<String, String>) -> Result<Self, HeaderError> {
        let event_type = headers
            .get("x-github-event")
            .or_else(|| headers.get("X-GitHub-Event"))
            .ok_or_else(|| HeaderError::Missing {
                name: "X-GitHub-Event".to_string(),
            })?
            .clone();

        let delivery_id = headers
            .get("x-github-delivery")
            .or_else(|| headers.get("X-GitHub-Delivery"))
            .cloned();

        let signature = headers
            .get("x-hub-signature-256")
            .or_else(|| headers.get("X-Hub-Signature-256"))
            .cloned();

        let content_type = headers
            .get("content-type")
            .or_else(|| headers.get("Content-Type"))
            .unwrap_or(&"application/json".to_string())
            .clone();

        let headers = Self {
            event_type,
            delivery_id,
            signature,
            content_type,
        };

        headers.validate()?;
        Ok(headers)
    }

    /// Validate header values.
    pub fn validate(&self) -> Result<(), HeaderError> {
        if self.event_type.is_empty() {
            return Err(HeaderError::Missing {
                name: "X-GitHub-Event".to_string(),
            });
        }

        // GitHub delivers webhook payloads as JSON; anything else cannot be
        // verified or parsed meaningfully.
        if !self.content_type.starts_with("application/json") {
            return Err(HeaderError::Invalid {
                name: "Content-Type".to_string(),
                message: "must be application/json".to_string(),
            });
        }

        Ok(())
    }
}

// ============================================================================
// Error Types
// ============================================================================

/// Header parsing and validation failures.
#[derive(Debug, thiserror::Error)]
pub enum HeaderError {
    #[error("required header missing: {name}")]
    Missing { name: String },

    #[error("invalid value for header {name}: {message}")]
    Invalid { name: String, message: String },
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
