//! Slack incoming-webhook client.
//!
//! Posts `{"attachments": [...]}` to the webhook URL. Slack answers a
//! successful post with the plain-text body `ok`; anything else is treated as
//! a failed delivery. There is no retry.

use std::time::Duration;

use async_trait::async_trait;
use jobnotify_core::{check_acknowledgement, DeliveryError, MessageSink, RenderedMessage};
use tracing::{debug, info, warn};

/// Default HTTP timeout for one delivery.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Webhook configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookConfig {
    /// Incoming-webhook URL; passed through unvalidated
    pub url: String,
    /// Whole-request timeout
    pub timeout: Duration,
    pub user_agent: String,
}

impl WebhookConfig {
    /// Create config for a webhook URL with default timeout and user agent
    pub fn new(url: &str) -> Self {
        WebhookConfig {
            url: url.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("jobnotify/{}", jobnotify_core::VERSION),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: &str) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }
}

/// Slack incoming-webhook sink.
pub struct SlackWebhook {
    config: WebhookConfig,
    http: reqwest::Client,
}

impl SlackWebhook {
    /// Create a webhook client.
    pub fn new(config: WebhookConfig) -> Result<Self, DeliveryError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(|e| DeliveryError::Client(e.to_string()))?;

        Ok(SlackWebhook { config, http })
    }

    /// Create a webhook client with default settings.
    pub fn from_url(url: &str) -> Result<Self, DeliveryError> {
        Self::new(WebhookConfig::new(url))
    }

    pub fn config(&self) -> &WebhookConfig {
        &self.config
    }
}

#[async_trait]
impl MessageSink for SlackWebhook {
    async fn deliver(&self, message: &RenderedMessage) -> Result<(), DeliveryError> {
        let payload = message.to_payload();
        debug!(len = message.text.len(), "posting Slack webhook payload");

        let resp = self
            .http
            .post(&self.config.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;

        if !status.is_success() {
            warn!(status = %status, body = %text, "Slack webhook returned error");
            return Err(DeliveryError::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        check_acknowledgement(&text)?;
        info!("Slack message delivered");
        Ok(())
    }
}
