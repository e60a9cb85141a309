//! Message sink abstraction.
//!
//! A `MessageSink` performs exactly one delivery per call and never retries.
//! `MemorySink` is an in-memory fake for tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::RenderedMessage;
use crate::error::DeliveryError;

/// Acknowledgement body returned by an incoming webhook on success.
pub const ACK_OK: &str = "ok";

/// Accept `text` only if it is exactly the `ok` acknowledgement.
pub fn check_acknowledgement(text: &str) -> Result<(), DeliveryError> {
    if text == ACK_OK {
        Ok(())
    } else {
        Err(DeliveryError::UnexpectedResponse {
            text: text.to_string(),
        })
    }
}

/// Destination for rendered notifications.
#[async_trait]
pub trait MessageSink: Send + Sync {
    /// Deliver one message and verify the acknowledgement.
    async fn deliver(&self, message: &RenderedMessage) -> Result<(), DeliveryError>;
}

#[async_trait]
impl<T: MessageSink + ?Sized> MessageSink for Arc<T> {
    async fn deliver(&self, message: &RenderedMessage) -> Result<(), DeliveryError> {
        (**self).deliver(message).await
    }
}

/// In-memory sink that records every delivered message.
#[derive(Debug)]
pub struct MemorySink {
    delivered: Mutex<Vec<RenderedMessage>>,
    ack: String,
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySink {
    /// A sink that acknowledges with `ok`.
    pub fn new() -> Self {
        Self::with_ack(ACK_OK)
    }

    /// A sink that acknowledges with arbitrary text.
    pub fn with_ack(ack: &str) -> Self {
        MemorySink {
            delivered: Mutex::new(Vec::new()),
            ack: ack.to_string(),
        }
    }

    /// Messages received so far, including ones that were not acknowledged.
    pub fn delivered(&self) -> Vec<RenderedMessage> {
        self.delivered
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl MessageSink for MemorySink {
    async fn deliver(&self, message: &RenderedMessage) -> Result<(), DeliveryError> {
        if let Ok(mut messages) = self.delivered.lock() {
            messages.push(message.clone());
        }
        check_acknowledgement(&self.ack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ColorTag;

    fn message() -> RenderedMessage {
        RenderedMessage {
            color: ColorTag::Good,
            text: "Success: mona's <|deploy>".to_string(),
            footer: "octo/widgets".to_string(),
        }
    }

    #[test]
    fn test_check_acknowledgement() {
        assert!(check_acknowledgement("ok").is_ok());
        assert!(matches!(
            check_acknowledgement("OK"),
            Err(DeliveryError::UnexpectedResponse { text }) if text == "OK"
        ));
        assert!(check_acknowledgement("ok\n").is_err());
        assert!(check_acknowledgement("").is_err());
    }

    #[tokio::test]
    async fn test_memory_sink_records_delivery() {
        let sink = MemorySink::new();
        sink.deliver(&message()).await.unwrap();

        assert_eq!(sink.delivered(), vec![message()]);
    }

    #[tokio::test]
    async fn test_memory_sink_rejects_other_ack() {
        let sink = MemorySink::with_ack("invalid_token");
        let err = sink.deliver(&message()).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "Failed to send notification to Slack: invalid_token"
        );
        assert_eq!(sink.delivered().len(), 1);
    }
}
