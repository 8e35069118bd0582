//! Content tier definitions and startup-time resolution
//!
//! A tier is one candidate source in the priority-ordered fallback chain.
//! The list always ends in an offline generator, so resolution is total:
//! [`TierSelector::resolve`] cannot fail to return a tier.

use std::time::Duration;

use tracing::info;

use super::probe::HealthProbe;
use crate::config::SourcesConfig;

/// What a tier actually talks to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TierKind {
    /// Remote quote API reached over HTTP
    Remote { base_url: String },
    /// Local generator, no network I/O
    Offline,
}

/// One candidate content source
///
/// Immutable after the tier list is built; the list order defines cascade
/// priority.
#[derive(Debug, Clone)]
pub struct Tier {
    pub name: String,
    pub kind: TierKind,
    /// Per-call timeout for probe and fetch requests
    pub timeout: Duration,
    /// Reachability attempts during startup probing
    pub max_probe_attempts: u32,
}

impl Tier {
    /// Create a remote tier
    pub fn remote(
        name: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
        max_probe_attempts: u32,
    ) -> Self {
        Self {
            name: name.into(),
            kind: TierKind::Remote {
                base_url: base_url.into(),
            },
            timeout,
            max_probe_attempts,
        }
    }

    /// Create the offline tier
    pub fn offline() -> Self {
        Self {
            name: "offline".to_string(),
            kind: TierKind::Offline,
            timeout: Duration::ZERO,
            max_probe_attempts: 1,
        }
    }

    pub fn is_offline(&self) -> bool {
        matches!(self.kind, TierKind::Offline)
    }

    /// Endpoint serving one random item, if the tier is remote
    pub fn random_endpoint(&self) -> Option<String> {
        match &self.kind {
            TierKind::Remote { base_url } => {
                Some(format!("{}/random", base_url.trim_end_matches('/')))
            }
            TierKind::Offline => None,
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Build the standard tier chain from configuration
///
/// Priority order: primary remote, secondary remote, offline.
pub fn tiers_from_config(sources: &SourcesConfig) -> Vec<Tier> {
    let timeout = Duration::from_secs(sources.request_timeout_secs);
    vec![
        Tier::remote(
            "zenquotes",
            &sources.primary_url,
            timeout,
            sources.primary_probe_attempts,
        ),
        Tier::remote(
            "quotable",
            &sources.secondary_url,
            timeout,
            sources.secondary_probe_attempts,
        ),
        Tier::offline(),
    ]
}

/// Resolves which tier is active at startup
pub struct TierSelector {
    probe: HealthProbe,
}

impl TierSelector {
    pub fn new(probe: HealthProbe) -> Self {
        Self { probe }
    }

    /// Probe tiers in priority order and return the index of the first one
    /// that answers.
    ///
    /// Short-circuits on success; later tiers are not probed. The offline
    /// tier probes true without I/O, so a list ending in it always resolves.
    /// Runs once at construction time; the per-call cascade is separate.
    pub async fn resolve(&self, tiers: &[Tier]) -> usize {
        for (index, tier) in tiers.iter().enumerate() {
            if self.probe.probe(tier).await {
                info!(tier = %tier.name, index, "active tier resolved");
                return index;
            }
        }
        // Only reachable with a malformed list that lacks an offline tail;
        // degrade to the lowest-priority tier rather than failing.
        tiers.len().saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_endpoint() {
        let tier = Tier::remote("zenquotes", "https://zenquotes.io/api/", Duration::ZERO, 1);
        assert_eq!(
            tier.random_endpoint().unwrap(),
            "https://zenquotes.io/api/random"
        );
        assert_eq!(Tier::offline().random_endpoint(), None);
    }

    #[test]
    fn test_tiers_from_config_order() {
        let sources = crate::config::Config::default().sources;
        let tiers = tiers_from_config(&sources);

        assert_eq!(tiers.len(), 3);
        assert_eq!(tiers[0].name, "zenquotes");
        assert_eq!(tiers[1].name, "quotable");
        assert!(tiers[2].is_offline());
        assert_eq!(tiers[0].max_probe_attempts, 3);
        assert_eq!(tiers[1].max_probe_attempts, 2);
    }

    #[tokio::test]
    async fn test_resolve_falls_through_to_offline() {
        // Unroutable endpoints with one probe attempt each
        let tiers = vec![
            Tier::remote(
                "primary",
                "http://127.0.0.1:9",
                Duration::from_millis(50),
                1,
            ),
            Tier::remote(
                "secondary",
                "http://127.0.0.1:9",
                Duration::from_millis(50),
                1,
            ),
            Tier::offline(),
        ];

        let probe = HealthProbe::new(Duration::ZERO).unwrap();
        let selector = TierSelector::new(probe);
        let active = selector.resolve(&tiers).await;

        assert_eq!(active, 2);
        assert!(tiers[active].is_offline());
    }

    #[tokio::test]
    async fn test_resolve_offline_only_list() {
        let tiers = vec![Tier::offline()];
        let probe = HealthProbe::new(Duration::ZERO).unwrap();
        let selector = TierSelector::new(probe);

        assert_eq!(selector.resolve(&tiers).await, 0);
    }
}
