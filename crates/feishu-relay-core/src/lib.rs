//! # Feishu Relay Core
//!
//! Domain logic for relaying GitHub `workflow_job` completion events to a
//! Feishu (Lark) incoming webhook.
//!
//! This crate contains everything that does not depend on an HTTP server:
//!
//! - Webhook request capture and header parsing ([`webhook`])
//! - HMAC-SHA256 signature verification for inbound payloads
//!   ([`webhook::signature`])
//! - The `workflow_job` payload model and completion filter ([`event`])
//! - Timestamp normalisation and duration formatting ([`timestamp`])
//! - The Feishu interactive card model and the job-to-card transformation
//!   ([`card`])
//! - Outbound message signing and delivery ([`feishu`])
//!
//! The HTTP surface lives in `feishu-relay-api`; the binary entry point in
//! `feishu-relay-service`.

pub mod card;
pub mod event;
pub mod feishu;
pub mod timestamp;
pub mod webhook;

pub use card::{Card, CardButton, CardElement, CardHeader, CardMessage, CardText};
pub use event::{Repository, WorkflowJob, WorkflowJobEvent, COMPLETED_ACTION, WORKFLOW_JOB_EVENT};
pub use feishu::{card_signature, DeliveryError, FeishuClient, FeishuClientConfig, SigningError};
pub use timestamp::{format_duration, JobTimestamp, DURATION_UNAVAILABLE};
pub use webhook::{
    HeaderError, HmacSha256Validator, SignatureError, SignatureValidator, WebhookHeaders,
    WebhookRequest,
};
