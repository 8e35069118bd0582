//! Hourly relay job
//!
//! Pulls one quote through the tier cascade and forwards it to the
//! persistence boundary with its provenance tag and a timestamp. Every
//! failure is caught and logged; nothing here affects the next scheduled
//! run, and nothing is retried within a tick.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};

use crate::models::ContentItem;
use crate::source::ContentFetcher;
use crate::storage::ProverbRepository;

/// Recurring fetch-and-persist job
pub struct RelayScheduler {
    fetcher: Arc<ContentFetcher>,
    repository: Arc<dyn ProverbRepository>,
    interval: Duration,
}

impl RelayScheduler {
    pub fn new(
        fetcher: Arc<ContentFetcher>,
        repository: Arc<dyn ProverbRepository>,
        interval: Duration,
    ) -> Self {
        Self {
            fetcher,
            repository,
            interval,
        }
    }

    /// Run the relay loop forever
    ///
    /// The first tick fires immediately, matching the original fixed-rate
    /// behavior.
    pub async fn run(&self) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            self.run_once().await;
        }
    }

    /// One relay invocation
    ///
    /// The fetch itself cannot fail (4.3's guarantee); only the save can,
    /// and a failed save ends the invocation quietly.
    pub async fn run_once(&self) {
        let (quote, provenance) = self.fetcher.fetch_tagged().await;
        info!(tier = %provenance, quote = %quote, "relay fetched quote");

        let item = ContentItem::from_quote(&quote, &provenance);
        match self.repository.save(&item) {
            Ok(saved) => {
                info!(id = saved.id, tier = %provenance, "relay saved quote");
            }
            Err(e) => {
                error!(tier = %provenance, error = %e, "relay save failed");
            }
        }
    }
}
