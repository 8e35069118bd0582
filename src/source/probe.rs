//! Reachability probing with bounded attempts and linear backoff
//!
//! `probe` converts every failure mode into `false`; nothing escapes as an
//! error. The inter-attempt delay is injectable so tests can count attempts
//! without real wall-clock waits.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, error, info, warn};

use super::error::FetchError;
use super::tier::Tier;

/// Startup-time health probe for content tiers
pub struct HealthProbe {
    client: Client,
    /// Base delay for linear backoff (attempt N failure waits N * base)
    base_delay: Duration,
}

impl HealthProbe {
    /// Create a probe with the given backoff base delay
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Http` if the HTTP client cannot be created
    pub fn new(base_delay: Duration) -> Result<Self, FetchError> {
        let client = Client::builder().gzip(true).build()?;
        Ok(Self { client, base_delay })
    }

    /// Test whether a tier is reachable
    ///
    /// Performs up to `tier.max_probe_attempts` bounded-timeout checks,
    /// sleeping `attempt * base_delay` between failures. Returns `true` on
    /// the first success; never returns an error. Offline tiers are
    /// trivially reachable.
    pub async fn probe(&self, tier: &Tier) -> bool {
        self.probe_with_delay(tier, |d| tokio::time::sleep(d)).await
    }

    /// `probe` with an injectable inter-attempt delay
    pub async fn probe_with_delay<F, Fut>(&self, tier: &Tier, delay: F) -> bool
    where
        F: Fn(Duration) -> Fut,
        Fut: Future<Output = ()>,
    {
        if tier.is_offline() {
            debug!(tier = %tier.name, "offline tier, probe trivially succeeds");
            return true;
        }

        for attempt in 1..=tier.max_probe_attempts {
            match self.check(tier).await {
                Ok(()) => {
                    info!(
                        tier = %tier.name,
                        attempt,
                        max_attempts = tier.max_probe_attempts,
                        "tier reachable"
                    );
                    return true;
                }
                Err(e) => {
                    warn!(
                        tier = %tier.name,
                        attempt,
                        max_attempts = tier.max_probe_attempts,
                        error = %e,
                        "probe attempt failed"
                    );
                    if attempt < tier.max_probe_attempts {
                        delay(self.backoff(attempt)).await;
                    }
                }
            }
        }

        error!(
            tier = %tier.name,
            attempts = tier.max_probe_attempts,
            "tier not reachable after all attempts"
        );
        false
    }

    /// Linear backoff: attempt N waits N * base_delay
    fn backoff(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt)
    }

    /// One bounded reachability check against the tier's random-item endpoint
    async fn check(&self, tier: &Tier) -> Result<(), FetchError> {
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
        if status.is_success() {
            Ok(())
        } else {
            Err(FetchError::ServerError(status.as_u16()))
        }
    }
}
