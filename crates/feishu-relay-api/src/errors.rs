//! Error types for the HTTP service.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use feishu_relay_core::webhook::HeaderError;
use feishu_relay_core::{DeliveryError, SignatureError};
use tracing::{error, warn};

pub use crate::config::ConfigError;

/// Webhook handler errors with HTTP status code mapping.
///
/// The status codes are part of the relay's public contract:
///
/// - `400 Bad Request`: missing or malformed required headers
/// - `401 Unauthorized`: signature verification failed; the request is
///   rejected before the payload is parsed and no downstream call is made
/// - `500 Internal Server Error`: malformed payload, downstream delivery
///   failure, or an unexpected internal fault
///
/// Every variant converts to a JSON body of the shape
/// `{"error": <string>, "details": <string, optional>}`. There are no
/// retries; each failure is terminal for that request.
#[derive(Debug, thiserror::Error)]
pub enum WebhookHandlerError {
    /// Invalid or missing required HTTP headers.
    #[error("Invalid headers: {0}")]
    InvalidHeaders(#[from] HeaderError),

    /// Inbound signature verification failed.
    #[error("Invalid signature")]
    InvalidSignature(#[source] SignatureError),

    /// The payload could not be parsed as a `workflow_job` event.
    #[error("Malformed payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    /// Feishu rejected the message or could not be reached.
    #[error("Delivery to Feishu failed: {0}")]
    Delivery(#[from] DeliveryError),

    /// Unexpected internal server error.
    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl From<SignatureError> for WebhookHandlerError {
    fn from(err: SignatureError) -> Self {
        Self::InvalidSignature(err)
    }
}

impl IntoResponse for WebhookHandlerError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            Self::InvalidHeaders(ref e) => {
                warn!(error = %e, "Rejecting request with invalid headers");
                (
                    StatusCode::BAD_REQUEST,
                    "Invalid headers".to_string(),
                    Some(e.to_string()),
                )
            }
            Self::InvalidSignature(ref e) => {
                // Do not leak which part of verification failed
                warn!(error = %e, "Rejecting request with invalid signature");
                (
                    StatusCode::UNAUTHORIZED,
                    "Invalid signature".to_string(),
                    None,
                )
            }
            Self::MalformedPayload(ref e) => {
                error!(error = %e, "Failed to parse webhook payload");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server error".to_string(),
                    Some(e.to_string()),
                )
            }
            Self::Delivery(ref e) => {
                error!(error = %e, "Failed to deliver message to Feishu");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server error".to_string(),
                    Some(e.to_string()),
                )
            }
            Self::Internal { ref message } => {
                error!(error = %message, "Internal server error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server error".to_string(),
                    Some(message.clone()),
                )
            }
        };

        let mut body = serde_json::json!({ "error": error });
        if let Some(details) = details {
            body["details"] = serde_json::Value::String(details);
        }

        (status, Json(body)).into_response()
    }
}

/// Service-level errors.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("failed to bind to address {address}: {message}")]
    BindFailed { address: String, message: String },

    #[error("server failed: {message}")]
    ServerFailed { message: String },

    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("failed to build Feishu client: {0}")]
    FeishuClient(#[from] DeliveryError),
}

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;
