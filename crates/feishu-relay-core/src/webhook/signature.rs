//! Webhook signature verification.
//!
//! Provides HMAC-SHA256 signature verification for GitHub webhooks using
//! constant-time comparison to prevent timing attacks.

use async_trait::async_trait;

/// Verifies the authenticity of an inbound webhook payload.
///
/// The trait seam allows the HTTP layer to be tested with stub validators and
/// keeps the verification policy (which secret, whether verification is
/// enabled at all) out of the request handler.
#[async_trait]
pub trait SignatureValidator: Send + Sync {
    /// Verify `signature` against the raw payload bytes.
    ///
    /// `payload` must be the literal bytes received on the wire.
    ///
    /// # Errors
    ///
    /// * [`SignatureError::MissingSignature`] - no signature header was sent
    /// * [`SignatureError::InvalidFormat`] - the header is not `sha256=<hex>`
    /// * [`SignatureError::Mismatch`] - the HMAC does not match the payload
    async fn validate(&self, payload: &[u8], signature: Option<&str>)
        -> Result<(), SignatureError>;
}

/// Validates GitHub webhook signatures using HMAC-SHA256 with a literal
/// secret.
///
/// The expected signature is `"sha256=" + hex(HMAC-SHA256(secret, payload))`,
/// compared against the `X-Hub-Signature-256` header value.
///
/// # Security
///
/// - Uses constant-time comparison to prevent timing attacks
/// - Never logs secrets or signature values
/// - Validates signature format before HMAC computation
#[derive(Clone)]
pub struct HmacSha256Validator {
    secret: String,
}

impl HmacSha256Validator {
    /// Create a new validator for the given webhook secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Parse GitHub's signature format.
    ///
    /// Extracts hex-encoded signature bytes from the `sha256=<hex>` header
    /// value.
    fn parse_signature(&self, signature: &str) -> Result<Vec<u8>, SignatureError> {
        const PREFIX: &str = "sha256=";
        if !signature.starts_with(PREFIX) {
            return Err(SignatureError::InvalidFormat {
                message: format!(
                    "signature must start with '{}', got: '{}'",
                    PREFIX,
                    signature.chars().take(10).collect::<String>()
                ),
            });
        }

        let hex_signature = &signature[PREFIX.len()..];

        hex::decode(hex_signature).map_err(|e| SignatureError::InvalidFormat {
            message: format!("invalid hex encoding in signature: {}", e),
        })
    }

    /// Compute the expected HMAC-SHA256 signature for the payload.
    fn compute_hmac(&self, payload: &[u8]) -> Result<Vec<u8>, SignatureError> {
        use hmac::{Hmac, Mac};
        use sha2::Sha256;

        type HmacSha256 = Hmac<Sha256>;

        let mut mac =
            HmacSha256::new_from_slice(self.secret.as_bytes()).map_err(|e| SignatureError::Hmac {
                message: format!("failed to create HMAC instance: {}", e),
            })?;

        mac.update(payload);

        Ok(mac.finalize().into_bytes().to_vec())
    }

    /// Constant-time comparison of signature bytes.
    fn constant_time_compare(&self, a: &[u8], b: &[u8]) -> bool {
        use subtle::ConstantTimeEq;

        // Length comparison is safe to do in non-constant time.
        if a.len() != b.len() {
            return false;
        }

        a.ct_eq(b).into()
    }
}

#[async_trait]
impl SignatureValidator for HmacSha256Validator {
    async fn validate(
        &self,
        payload: &[u8],
        signature: Option<&str>,
    ) -> Result<(), SignatureError> {
        let signature = signature.ok_or(SignatureError::MissingSignature)?;

        let signature_bytes = self.parse_signature(signature)?;
        let expected_hmac = self.compute_hmac(payload)?;

        if self.constant_time_compare(&signature_bytes, &expected_hmac) {
            Ok(())
        } else {
            Err(SignatureError::Mismatch)
        }
    }
}

// Security: don't expose the secret in debug output
impl std::fmt::Debug for HmacSha256Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacSha256Validator")
            .field("secret", &"<REDACTED>")
            .finish()
    }
}

/// Signature verification failures.
///
/// All variants terminate request processing before the payload is parsed or
/// any downstream call is made.
#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    #[error("signature header missing")]
    MissingSignature,

    #[error("invalid signature format: {message}")]
    InvalidFormat { message: String },

    #[error("signature does not match payload")]
    Mismatch,

    #[error("HMAC computation failed: {message}")]
    Hmac { message: String },
}

#[cfg(test)]
#[path = "signature_tests.rs"]
mod tests;
