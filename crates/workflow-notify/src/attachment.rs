use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::context::WorkflowContext;
use crate::status::{Color, StatusDisplay};

pub const DEFAULT_FOOTER_ICON: &str = "https://github.githubassets.com/favicon.ico";

/// Body of an incoming-webhook request.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookPayload {
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attachment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_icon: Option<String>,
    pub color: Color,
    pub footer: String,
    pub footer_icon: String,
    pub mrkdwn_in: Vec<&'static str>,
    /// Epoch milliseconds.
    pub ts: String,
    pub text: String,
}

impl Attachment {
    /// Build the attachment for an already formatted message.
    ///
    /// The timestamp is the repository's last push, except for scheduled runs
    /// (which have no push) or payloads without one, where `now` is used.
    pub fn build(
        ctx: &WorkflowContext,
        display: StatusDisplay,
        text: String,
        footer_icon: &str,
        now: DateTime<Utc>,
    ) -> Self {
        let ts = match ctx.pushed_at {
            Some(pushed_at) if !ctx.event.is_schedule() => pushed_at.timestamp_millis(),
            _ => now.timestamp_millis(),
        };
        let sender = ctx.sender.as_ref();

        Self {
            author_name: sender.and_then(|s| s.login.clone()),
            author_link: sender.and_then(|s| s.html_url.clone()),
            author_icon: sender.and_then(|s| s.avatar_url.clone()),
            color: display.color,
            footer: format!("<{}|{}>", ctx.repository_url(), ctx.repository),
            footer_icon: footer_icon.to_string(),
            mrkdwn_in: vec!["text"],
            ts: ts.to_string(),
            text,
        }
    }
}

impl From<Attachment> for WebhookPayload {
    fn from(attachment: Attachment) -> Self {
        Self {
            attachments: vec![attachment],
        }
    }
}
