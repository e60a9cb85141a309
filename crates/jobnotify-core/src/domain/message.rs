//! Rendered messages and the incoming-webhook wire format.

use serde::{Deserialize, Serialize};

use super::job::JobStatus;

/// Attachment color bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorTag {
    Good,
    Danger,
    Warning,
    None,
}

impl ColorTag {
    pub fn for_status(status: &JobStatus) -> Self {
        match status {
            JobStatus::Success => ColorTag::Good,
            JobStatus::Failure => ColorTag::Danger,
            JobStatus::Cancelled => ColorTag::Warning,
            JobStatus::Other(_) => ColorTag::None,
        }
    }

    /// Wire value; `None` is sent as an empty string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColorTag::Good => "good",
            ColorTag::Danger => "danger",
            ColorTag::Warning => "warning",
            ColorTag::None => "",
        }
    }
}

/// A fully rendered notification, independent of the sink that carries it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    pub color: ColorTag,
    /// Title line, followed by the commit line when one is available.
    pub text: String,
    pub footer: String,
}

impl RenderedMessage {
    pub fn to_payload(&self) -> WebhookPayload {
        WebhookPayload {
            attachments: vec![Attachment {
                color: self.color.as_str().to_string(),
                text: self.text.clone(),
                footer: self.footer.clone(),
            }],
        }
    }
}

/// Body posted to the webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookPayload {
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub color: String,
    pub text: String,
    pub footer: String,
}
