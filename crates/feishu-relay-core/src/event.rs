//! # Workflow Job Events
//!
//! Payload model for the single GitHub event type the relay handles:
//! `workflow_job`. Only the fields needed to build the outbound card are
//! modelled; everything else in the payload is ignored during
//! deserialization.

use crate::timestamp::JobTimestamp;
use serde::{Deserialize, Serialize};

/// The `X-GitHub-Event` header value the relay processes.
pub const WORKFLOW_JOB_EVENT: &str = "workflow_job";

/// The payload `action` value the relay processes.
pub const COMPLETED_ACTION: &str = "completed";

/// A GitHub `workflow_job` webhook payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowJobEvent {
    pub action: String,
    pub workflow_job: WorkflowJob,
    pub repository: Repository,
}

impl WorkflowJobEvent {
    /// Deserialize a payload from raw body bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Whether this event represents a finished job.
    ///
    /// Anything else (`queued`, `in_progress`, `waiting`) is ignored by the
    /// relay.
    pub fn is_completed(&self) -> bool {
        self.action == COMPLETED_ACTION
    }
}

/// The job execution described by the event.
///
/// `conclusion` is `null` until the job finishes, and `workflow_name` and
/// `head_branch` can be absent on older payload versions, so all three are
/// optional here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowJob {
    pub conclusion: Option<String>,
    pub workflow_name: Option<String>,
    pub name: String,
    pub head_branch: Option<String>,
    pub html_url: String,
    pub started_at: Option<JobTimestamp>,
    pub completed_at: Option<JobTimestamp>,
}

impl WorkflowJob {
    /// Whether the job finished successfully.
    pub fn is_success(&self) -> bool {
        self.conclusion.as_deref() == Some("success")
    }
}

/// The repository the job ran in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub full_name: String,
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
