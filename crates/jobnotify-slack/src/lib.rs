//! Slack delivery for jobnotify
//!
//! Implements [`jobnotify_core::MessageSink`] on top of a Slack incoming
//! webhook.

pub mod webhook;

pub use webhook::{SlackWebhook, WebhookConfig, DEFAULT_TIMEOUT};
