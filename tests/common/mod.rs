//! Shared test fixtures

use std::sync::Mutex;

use async_trait::async_trait;

use proverbly::error::{Error, Result};
use proverbly::models::{ContentItem, Origin};
use proverbly::notify::{DeliveryStatus, Notifier, NotifyResult};
use proverbly::storage::ProverbRepository;

/// Build a local proverb with deterministic fields
pub fn local_item(id: i64, language: &str) -> ContentItem {
    ContentItem {
        id,
        language: language.to_string(),
        text: format!("proverb {id}"),
        translation: Some(format!("translation {id}")),
        meaning: Some(format!("meaning {id}")),
        origin: Origin::Local,
        ..Default::default()
    }
}

/// Notifier that records every message and always accepts
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn name(&self) -> &str {
        "recording"
    }

    async fn send(&self, message: &str) -> NotifyResult<DeliveryStatus> {
        self.messages.lock().unwrap().push(message.to_string());
        Ok(DeliveryStatus::accepted("recording"))
    }
}

/// Repository whose saves always fail (reads are empty)
pub struct FailingRepository;

impl ProverbRepository for FailingRepository {
    fn find_all(&self) -> Result<Vec<ContentItem>> {
        Ok(Vec::new())
    }

    fn find_by_language(&self, _language: &str) -> Result<Vec<ContentItem>> {
        Ok(Vec::new())
    }

    fn save(&self, _item: &ContentItem) -> Result<ContentItem> {
        Err(Error::other("simulated storage outage"))
    }

    fn count(&self) -> Result<usize> {
        Ok(0)
    }
}
