//! Response body types for the API.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Successful relay response: the event was verified, transformed, and
/// delivered.
#[derive(Debug, Serialize)]
pub struct RelaySuccess {
    pub success: bool,
}

impl RelaySuccess {
    pub fn new() -> Self {
        Self { success: true }
    }
}

impl Default for RelaySuccess {
    fn default() -> Self {
        Self::new()
    }
}

/// Response for events the relay does not handle.
#[derive(Debug, Serialize)]
pub struct IgnoredResponse {
    pub message: String,
}

impl IgnoredResponse {
    pub fn new() -> Self {
        Self {
            message: "Event ignored".to_string(),
        }
    }
}

impl Default for IgnoredResponse {
    fn default() -> Self {
        Self::new()
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

/// Readiness check response.
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub timestamp: DateTime<Utc>,
}
