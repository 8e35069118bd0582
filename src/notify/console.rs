//! Console notification channel
//!
//! Stands in for a real messaging integration during local runs: the message
//! is logged in full and always counts as delivered.

use async_trait::async_trait;
use tracing::info;

use super::{DeliveryStatus, Notifier, NotifyResult};

/// Log-only notifier used when no webhook is configured
#[derive(Debug, Default, Clone)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for ConsoleNotifier {
    fn name(&self) -> &str {
        "console"
    }

    async fn send(&self, message: &str) -> NotifyResult<DeliveryStatus> {
        info!(
            "\n--- DIGEST MESSAGE ---\n{}\n----------------------",
            message
        );
        Ok(DeliveryStatus::accepted("console"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_console_always_accepts() {
        let notifier = ConsoleNotifier::new();
        let status = notifier.send("hello").await.unwrap();
        assert!(status.accepted);
        assert_eq!(notifier.name(), "console");
    }
}
