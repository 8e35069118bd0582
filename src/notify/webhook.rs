//! Webhook notification channel
//!
//! Delivers digest messages as JSON payloads via HTTP POST. One attempt per
//! send; a failed delivery is reported to the caller, who logs it and moves
//! on.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{DeliveryStatus, Notifier, NotifyError, NotifyResult};

/// Webhook channel configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    /// Webhook URL endpoint
    pub url: String,
    /// Optional authentication token (sent as Bearer token)
    pub auth_token: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    10
}

impl WebhookConfig {
    /// Create a new webhook configuration
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            auth_token: None,
            timeout_secs: default_timeout(),
        }
    }

    /// Set authentication token
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Set request timeout
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.url.is_empty() {
            return Err("Webhook URL cannot be empty".to_string());
        }

        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err("Webhook URL must start with http:// or https://".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("Timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}

/// Webhook notification channel
///
/// # Payload Format
///
/// ```json
/// {
///   "text": "formatted digest message",
///   "sent_at": "2024-01-01T12:00:00+00:00"
/// }
/// ```
pub struct WebhookNotifier {
    config: WebhookConfig,
    client: Client,
}

impl WebhookNotifier {
    /// Create a new webhook notifier
    pub fn new(config: WebhookConfig) -> NotifyResult<Self> {
        config.validate().map_err(NotifyError::InvalidConfig)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    /// Create a webhook notifier with just a URL
    pub fn from_url(url: impl Into<String>) -> NotifyResult<Self> {
        Self::new(WebhookConfig::new(url))
    }

    /// Get the webhook URL
    pub fn url(&self) -> &str {
        &self.config.url
    }

    fn build_payload(&self, message: &str) -> serde_json::Value {
        serde_json::json!({
            "text": message,
            "sent_at": chrono::Utc::now().to_rfc3339(),
        })
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    fn name(&self) -> &str {
        "webhook"
    }

    async fn send(&self, message: &str) -> NotifyResult<DeliveryStatus> {
        let payload = self.build_payload(message);

        let mut request = self.client.post(&self.config.url);
        if let Some(token) = &self.config.auth_token {
            request = request.bearer_auth(token);
        }

        match request.json(&payload).send().await {
            Ok(response) if response.status().is_success() => {
                tracing::info!(
                    url = %self.config.url,
                    status = %response.status(),
                    "digest delivered"
                );
                Ok(DeliveryStatus::accepted("webhook"))
            }
            Ok(response) => {
                let status = response.status();
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "unable to read response body".to_string());
                Ok(DeliveryStatus::rejected(
                    "webhook",
                    format!("HTTP {status}: {body}"),
                ))
            }
            Err(e) => Err(NotifyError::Http(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_webhook_config_validation() {
        assert!(WebhookConfig::new("https://example.com/hook").validate().is_ok());
        assert!(WebhookConfig::new("").validate().is_err());
        assert!(WebhookConfig::new("example.com/hook").validate().is_err());
        assert!(WebhookConfig::new("https://example.com")
            .with_timeout(0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_webhook_config_builder() {
        let config = WebhookConfig::new("https://example.com/hook")
            .with_auth_token("secret")
            .with_timeout(30);

        assert_eq!(config.url, "https://example.com/hook");
        assert_eq!(config.auth_token, Some("secret".to_string()));
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_webhook_creation() {
        let notifier = WebhookNotifier::from_url("https://example.com/hook").unwrap();
        assert_eq!(notifier.name(), "webhook");
        assert_eq!(notifier.url(), "https://example.com/hook");

        assert!(WebhookNotifier::from_url("not-a-url").is_err());
    }

    #[test]
    fn test_payload_carries_message() {
        let notifier = WebhookNotifier::from_url("https://example.com/hook").unwrap();
        let payload = notifier.build_payload("Morning Wisdom\n\nproverb text");

        assert_eq!(payload["text"], "Morning Wisdom\n\nproverb text");
        assert!(payload["sent_at"].is_string());
    }
}
