use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::attachment::{Attachment, WebhookPayload, DEFAULT_FOOTER_ICON};
use crate::context::WorkflowContext;
use crate::error::NotifyError;
use crate::message::format_message;
use crate::sink::WebhookSink;
use crate::status::JobStatus;

/// What happened to a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    /// The event kind has no message; nothing was posted.
    Skipped,
}

pub struct Notifier<S> {
    sink: S,
    footer_icon: String,
}

impl<S: WebhookSink> Notifier<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            footer_icon: DEFAULT_FOOTER_ICON.to_string(),
        }
    }

    pub fn with_footer_icon(mut self, footer_icon: impl Into<String>) -> Self {
        self.footer_icon = footer_icon.into();
        self
    }

    /// Build the payload that [`notify`](Self::notify) would send.
    pub fn prepare(
        &self,
        ctx: &WorkflowContext,
        status: JobStatus,
        now: DateTime<Utc>,
    ) -> Option<WebhookPayload> {
        let display = status.display();
        let text = format_message(ctx, display.text)?;
        Some(Attachment::build(ctx, display, text, &self.footer_icon, now).into())
    }

    /// Post the status of the run to `webhook_url`.
    ///
    /// Unsupported events are logged and reported as [`Delivery::Skipped`].
    pub async fn notify(
        &self,
        ctx: &WorkflowContext,
        status: JobStatus,
        webhook_url: &str,
    ) -> Result<Delivery, NotifyError> {
        debug!(?ctx, %status, "preparing notification");

        let Some(payload) = self.prepare(ctx, status, Utc::now()) else {
            info!("We don't support the [{}] event yet.", ctx.event_name);
            return Ok(Delivery::Skipped);
        };

        self.sink.post(webhook_url, &payload).await?;
        info!(event = %ctx.event_name, %status, "notification sent");
        Ok(Delivery::Sent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ContextVars;
    use crate::event::EventPayload;
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSink {
        posts: Mutex<Vec<(String, serde_json::Value)>>,
    }

    #[async_trait]
    impl WebhookSink for RecordingSink {
        async fn post(&self, url: &str, payload: &WebhookPayload) -> Result<(), NotifyError> {
            let body = serde_json::to_value(payload).unwrap();
            self.posts.lock().unwrap().push((url.to_string(), body));
            Ok(())
        }
    }

    struct RejectingSink;

    #[async_trait]
    impl WebhookSink for RejectingSink {
        async fn post(&self, _url: &str, _payload: &WebhookPayload) -> Result<(), NotifyError> {
            Err(NotifyError::Rejected {
                status: reqwest::StatusCode::FORBIDDEN,
                body: "invalid_token".into(),
            })
        }
    }

    fn context(event_name: &str, git_ref: &str, payload: serde_json::Value) -> WorkflowContext {
        let payload: EventPayload = serde_json::from_value(payload).unwrap();
        WorkflowContext::from_payload(
            ContextVars {
                repository: "acme/widgets".into(),
                run_id: "3".into(),
                job: "test".into(),
                workflow: "CI".into(),
                git_ref: git_ref.into(),
                event_name: event_name.into(),
                ..Default::default()
            },
            payload,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn sends_one_post() {
        let ctx = context(
            "push",
            "refs/tags/v1.2.0",
            json!({"ref": "refs/tags/v1.2.0", "repository": {"pushed_at": 1_700_000_000}}),
        );
        let notifier = Notifier::new(RecordingSink::default());

        let delivery = notifier
            .notify(&ctx, JobStatus::Failure, "https://hooks.example/x")
            .await
            .unwrap();

        assert_eq!(delivery, Delivery::Sent);
        let posts = notifier.sink.posts.lock().unwrap();
        assert_eq!(posts.len(), 1);
        let (url, body) = &posts[0];
        assert_eq!(url, "https://hooks.example/x");
        let attachment = &body["attachments"][0];
        assert_eq!(attachment["color"], "danger");
        assert_eq!(attachment["ts"], "1700000000000");
        let text = attachment["text"].as_str().unwrap();
        assert!(text.contains("|v1.2.0>"));
        assert!(text.contains("*Failed*"));
    }

    #[tokio::test]
    async fn unsupported_event_sends_nothing() {
        let notifier = Notifier::new(RecordingSink::default());
        let contexts = [
            context("create", "refs/tags/v1", json!({"ref": "v1", "ref_type": "tag"})),
            context("issues", "", json!({})),
        ];
        for ctx in &contexts {
            let delivery = notifier
                .notify(ctx, JobStatus::Success, "https://hooks.example/x")
                .await
                .unwrap();
            assert_eq!(delivery, Delivery::Skipped);
        }
        assert!(notifier.sink.posts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn sink_failure_propagates() {
        let ctx = context("schedule", "refs/heads/main", json!({}));
        let err = Notifier::new(RejectingSink)
            .notify(&ctx, JobStatus::Success, "https://hooks.example/x")
            .await
            .unwrap_err();
        assert_matches!(err, NotifyError::Rejected { .. });
    }

    #[test]
    fn prepare_applies_footer_icon() {
        let ctx = context("schedule", "refs/heads/main", json!({}));
        let payload = Notifier::new(RecordingSink::default())
            .with_footer_icon("https://icons.example/ci.png")
            .prepare(&ctx, JobStatus::Cancelled, Utc::now())
            .unwrap();
        let attachment = &payload.attachments[0];
        assert_eq!(attachment.footer_icon, "https://icons.example/ci.png");
        assert_eq!(
            attachment.text,
            "Scheduled Workflow <https://github.com/acme/widgets/actions/runs/3|CI>"
        );
    }
}
