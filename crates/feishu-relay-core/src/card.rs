//! # Feishu Card Messages
//!
//! Serde model of the Feishu (Lark) interactive card message and the pure
//! transformation from a completed workflow job to the outbound card.
//!
//! The optional `timestamp` / `sign` fields are only present on the wire when
//! outbound signing is configured; see [`crate::feishu::sign`].

use crate::event::WorkflowJobEvent;
use crate::timestamp::format_duration;
use serde::Serialize;

/// Header color template for a successful job.
pub const TEMPLATE_SUCCESS: &str = "green";

/// Header color template for any non-success conclusion (failure, cancelled,
/// timed out).
pub const TEMPLATE_FAILURE: &str = "red";

/// Rendered when an optional payload field is absent.
const UNKNOWN: &str = "unknown";

/// A Feishu incoming-webhook message carrying an interactive card.
#[derive(Debug, Clone, Serialize)]
pub struct CardMessage {
    pub msg_type: String,
    pub card: Card,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sign: Option<String>,
}

impl CardMessage {
    /// Build the card for a completed workflow job.
    ///
    /// Pure function of the event payload: header color reflects the job
    /// conclusion, the body lists workflow, job, status, branch and duration,
    /// and a single button links to the job logs.
    pub fn for_completed_job(event: &WorkflowJobEvent) -> Self {
        let job = &event.workflow_job;
        let repo = &event.repository.full_name;

        let conclusion = job.conclusion.as_deref().unwrap_or(UNKNOWN);
        let template = if job.is_success() {
            TEMPLATE_SUCCESS
        } else {
            TEMPLATE_FAILURE
        };

        let body = format!(
            "**Workflow**: {}\n**Job**: {}\n**Status**: {}\n**Branch**: {}\n**Duration**: {}",
            job.workflow_name.as_deref().unwrap_or(UNKNOWN),
            job.name,
            conclusion,
            job.head_branch.as_deref().unwrap_or(UNKNOWN),
            format_duration(job.started_at.as_ref(), job.completed_at.as_ref()),
        );

        Self {
            msg_type: "interactive".to_string(),
            card: Card {
                header: CardHeader {
                    title: CardText::plain(format!(
                        "Job {}: {}",
                        conclusion.to_uppercase(),
                        repo
                    )),
                    template: template.to_string(),
                },
                elements: vec![
                    CardElement::Div {
                        text: CardText::lark_md(body),
                    },
                    CardElement::Action {
                        actions: vec![CardButton {
                            tag: "button".to_string(),
                            text: CardText::plain("View Logs".to_string()),
                            url: job.html_url.clone(),
                            button_type: "primary".to_string(),
                        }],
                    },
                ],
            },
            timestamp: None,
            sign: None,
        }
    }

    /// Attach an outbound signature.
    pub fn with_signature(mut self, timestamp: String, sign: String) -> Self {
        self.timestamp = Some(timestamp);
        self.sign = Some(sign);
        self
    }
}

/// The card content: a header plus a list of elements.
#[derive(Debug, Clone, Serialize)]
pub struct Card {
    pub header: CardHeader,
    pub elements: Vec<CardElement>,
}

/// Card header: plain-text title on a colored template.
#[derive(Debug, Clone, Serialize)]
pub struct CardHeader {
    pub title: CardText,
    pub template: String,
}

/// A card body element.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "tag", rename_all = "lowercase")]
pub enum CardElement {
    /// A markdown text block.
    Div { text: CardText },
    /// A row of interactive actions.
    Action { actions: Vec<CardButton> },
}

/// A text node, either `plain_text` or `lark_md`.
#[derive(Debug, Clone, Serialize)]
pub struct CardText {
    pub tag: String,
    pub content: String,
}

impl CardText {
    fn plain(content: String) -> Self {
        Self {
            tag: "plain_text".to_string(),
            content,
        }
    }

    fn lark_md(content: String) -> Self {
        Self {
            tag: "lark_md".to_string(),
            content,
        }
    }
}

/// A card action button.
#[derive(Debug, Clone, Serialize)]
pub struct CardButton {
    pub tag: String,
    pub text: CardText,
    pub url: String,
    #[serde(rename = "type")]
    pub button_type: String,
}

#[cfg(test)]
#[path = "card_tests.rs"]
mod tests;
