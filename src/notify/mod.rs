//! Notification channels for digest delivery
//!
//! Digest messages leave the system through a [`Notifier`]. Callers treat a
//! `false` delivery and an error identically: log and continue; nothing here
//! is retried within a scheduled invocation.

pub mod console;
pub mod webhook;

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

pub use console::ConsoleNotifier;
pub use webhook::{WebhookConfig, WebhookNotifier};

/// Result type for notifier operations
pub type NotifyResult<T> = Result<T, NotifyError>;

/// Errors that can occur during delivery
#[derive(Debug, Error)]
pub enum NotifyError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid channel configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Endpoint rejected the message
    #[error("Delivery rejected: {0}")]
    Rejected(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Outcome of one delivery attempt
#[derive(Debug, Clone)]
pub struct DeliveryStatus {
    /// Whether the message was accepted for delivery
    pub accepted: bool,
    /// Channel that handled (or failed to handle) the message
    pub channel: String,
    /// Optional detail about the attempt
    pub detail: Option<String>,
}

impl DeliveryStatus {
    /// Create an accepted status
    pub fn accepted(channel: impl Into<String>) -> Self {
        Self {
            accepted: true,
            channel: channel.into(),
            detail: None,
        }
    }

    /// Create a rejected status with a detail message
    pub fn rejected(channel: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            accepted: false,
            channel: channel.into(),
            detail: Some(detail.into()),
        }
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.accepted { "ACCEPTED" } else { "REJECTED" };
        write!(f, "[{status}] {}", self.channel)?;
        if let Some(detail) = &self.detail {
            write!(f, ": {detail}")?;
        }
        Ok(())
    }
}

/// Trait for notification channels
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Get the channel name
    fn name(&self) -> &str;

    /// Deliver one formatted message
    ///
    /// A clean `DeliveryStatus { accepted: false, .. }` and an `Err` are
    /// treated the same by callers.
    async fn send(&self, message: &str) -> NotifyResult<DeliveryStatus>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_status_display() {
        let ok = DeliveryStatus::accepted("webhook");
        assert!(ok.accepted);
        assert!(ok.to_string().contains("ACCEPTED"));

        let bad = DeliveryStatus::rejected("webhook", "connection reset");
        assert!(!bad.accepted);
        assert!(bad.to_string().contains("connection reset"));
    }
}
