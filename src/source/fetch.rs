//! The per-call fallback cascade
//!
//! [`ContentFetcher::fetch`] never errors: it walks the tier chain starting
//! at the preferred tier, treats transport failures and malformed payloads
//! identically, and bottoms out in a hardcoded synthetic quote. The cascade
//! moves forward through tiers only; it never retries the tier that just
//! failed (retries live in the startup probe, not here).

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, error, info, warn};

use super::error::FetchError;
use super::offline;
use super::probe::HealthProbe;
use super::schema;
use super::tier::{tiers_from_config, Tier, TierKind, TierSelector};
use crate::config::SourcesConfig;
use crate::models::{ContentItem, Quote};
use crate::storage::ProverbRepository;

/// Author tag on the terminal synthetic quote
pub const SYNTHETIC_AUTHOR: &str = "system";

/// Content of the terminal synthetic quote
const SYNTHETIC_CONTENT: &str = "Even when APIs fail, persistence wins the day.";

/// Fetches quotes across the tier chain with normalization and fallback
pub struct ContentFetcher {
    client: Client,
    tiers: Vec<Tier>,
    /// Tier resolved at startup; each fetch starts here
    preferred: usize,
    /// Sink for successfully fetched remote quotes; save failures are
    /// logged and never invalidate the in-flight fetch
    repository: Option<Arc<dyn ProverbRepository>>,
}

impl ContentFetcher {
    /// Build the standard tier chain from configuration, probe it, and fix
    /// the preferred tier
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created; tier
    /// resolution itself cannot fail.
    pub async fn connect(
        sources: &SourcesConfig,
        repository: Option<Arc<dyn ProverbRepository>>,
    ) -> Result<Self, FetchError> {
        let tiers = tiers_from_config(sources);
        let probe = HealthProbe::new(Duration::from_millis(sources.probe_base_delay_ms))?;
        let preferred = TierSelector::new(probe).resolve(&tiers).await;
        Self::with_tiers(tiers, preferred, repository)
    }

    /// Build a fetcher over an explicit tier chain (tests, custom chains)
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn with_tiers(
        tiers: Vec<Tier>,
        preferred: usize,
        repository: Option<Arc<dyn ProverbRepository>>,
    ) -> Result<Self, FetchError> {
        let client = Client::builder().gzip(true).build()?;
        let preferred = preferred.min(tiers.len().saturating_sub(1));
        Ok(Self {
            client,
            tiers,
            preferred,
            repository,
        })
    }

    /// The tier each fetch starts from
    pub fn preferred_tier(&self) -> &Tier {
        &self.tiers[self.preferred]
    }

    /// Fetch one quote, cascading through tiers on failure
    ///
    /// Always returns a usable quote; with every tier down the result is the
    /// synthetic fallback authored by `"system"`.
    pub async fn fetch(&self) -> Quote {
        self.fetch_tagged().await.0
    }

    /// `fetch` plus the provenance tag of the tier that answered
    ///
    /// The synthetic terminal quote carries the tag `"fallback"`.
    pub async fn fetch_tagged(&self) -> (Quote, String) {
        self.fetch_tagged_preferring(self.preferred).await
    }

    /// `fetch` with a per-call starting tier override
    pub async fn fetch_preferring(&self, start: usize) -> Quote {
        self.fetch_tagged_preferring(start).await.0
    }

    async fn fetch_tagged_preferring(&self, start: usize) -> (Quote, String) {
        for index in cascade_order(self.tiers.len(), start) {
            let tier = &self.tiers[index];
            match self.try_tier(tier).await {
                Ok(quote) => {
                    info!(tier = %tier.name, quote = %quote, "fetch succeeded");
                    if !tier.is_offline() {
                        self.persist(&quote, &tier.name);
                    }
                    return (quote, tier.name.clone());
                }
                Err(e) => {
                    warn!(tier = %tier.name, error = %e, "tier failed, cascading to next");
                }
            }
        }

        error!("all tiers exhausted, serving synthetic quote");
        (
            Quote::new(SYNTHETIC_CONTENT, SYNTHETIC_AUTHOR),
            "fallback".to_string(),
        )
    }

    /// One attempt against one tier: raw payload, then normalization
    async fn try_tier(&self, tier: &Tier) -> Result<Quote, FetchError> {
        let raw = match &tier.kind {
            TierKind::Remote { .. } => self.fetch_remote(tier).await?,
            TierKind::Offline => offline::random_payload(),
        };

        match schema::extract_quote(&raw) {
            Some((quote, schema)) => {
                debug!(tier = %tier.name, schema, "payload normalized");
                Ok(quote)
            }
            None => Err(FetchError::Malformed(preview(&raw))),
        }
    }

    /// Fetch the raw payload from a remote tier's random-item endpoint
    async fn fetch_remote(&self, tier: &Tier) -> Result<String, FetchError> {
        let endpoint = tier
            .random_endpoint()
            .ok_or_else(|| FetchError::Unreachable("tier has no endpoint".to_string()))?;

        let response = self
            .client
            .get(&endpoint)
            .timeout(tier.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout
                } else {
                    FetchError::Http(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::ServerError(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::Unreachable(e.to_string()))
    }

    /// Save a remote quote as an imported item, tagged with the tier name
    fn persist(&self, quote: &Quote, provenance: &str) {
        let Some(repo) = &self.repository else {
            return;
        };

        match repo.save(&ContentItem::from_quote(quote, provenance)) {
            Ok(saved) => {
                info!(id = saved.id, tier = provenance, "imported quote saved");
            }
            Err(e) => {
                error!(tier = provenance, error = %e, "failed to save imported quote");
            }
        }
    }
}

/// Cascade order: the starting tier first, then the rest in priority order
fn cascade_order(len: usize, start: usize) -> impl Iterator<Item = usize> {
    let start = start.min(len.saturating_sub(1));
    std::iter::once(start)
        .chain((0..len).filter(move |i| *i != start))
        .take(len)
}

/// Truncated payload preview for error messages
fn preview(raw: &str) -> String {
    const LIMIT: usize = 120;
    if raw.len() <= LIMIT {
        raw.to_string()
    } else {
        let cut = raw
            .char_indices()
            .take_while(|(i, _)| *i < LIMIT)
            .last()
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        format!("{}...", &raw[..cut])
    }
}
