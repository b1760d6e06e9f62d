use async_trait::async_trait;
use tracing::debug;

use crate::attachment::WebhookPayload;
use crate::error::NotifyError;

/// Destination for a finished webhook payload.
#[async_trait]
pub trait WebhookSink: Send + Sync {
    async fn post(&self, webhook_url: &str, payload: &WebhookPayload) -> Result<(), NotifyError>;
}

/// Posts payloads as JSON over HTTP.
#[derive(Debug, Clone, Default)]
pub struct HttpSink {
    client: reqwest::Client,
}

#[async_trait]
impl WebhookSink for HttpSink {
    async fn post(&self, webhook_url: &str, payload: &WebhookPayload) -> Result<(), NotifyError> {
        let response = self.client.post(webhook_url).json(payload).send().await?;

        let status = response.status();
        debug!(%status, "webhook responded");
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected { status, body });
        }
        Ok(())
    }
}
