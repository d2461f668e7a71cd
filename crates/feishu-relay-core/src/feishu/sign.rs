//! Outbound message signing for Feishu incoming webhooks.
//!
//! Feishu's documented scheme derives the HMAC key from the timestamp and
//! the bot secret (`"{timestamp}\n{secret}"`) and signs an empty message; the
//! signature is the base64 of the raw HMAC output.

use base64::{engine::general_purpose, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Signing failures.
#[derive(Debug, thiserror::Error)]
pub enum SigningError {
    #[error("failed to create HMAC instance: {message}")]
    Hmac { message: String },
}

/// Compute the Feishu webhook signature for the given secret and timestamp.
///
/// `timestamp` is unix seconds; the same value must be sent alongside the
/// signature in the message body. The output is deterministic for a fixed
/// `(secret, timestamp)` pair.
pub fn card_signature(secret: &str, timestamp: i64) -> Result<String, SigningError> {
    let string_to_sign = format!("{}\n{}", timestamp, secret);

    let mac =
        HmacSha256::new_from_slice(string_to_sign.as_bytes()).map_err(|e| SigningError::Hmac {
            message: e.to_string(),
        })?;

    // HMAC over an empty message, per Feishu's scheme.
    let signature = mac.finalize().into_bytes();

    Ok(general_purpose::STANDARD.encode(signature))
}

#[cfg(test)]
#[path = "sign_tests.rs"]
mod tests;
