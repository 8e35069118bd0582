//! Configuration management for the proverbly agent
//!
//! This module handles loading and validating configuration from environment
//! variables and TOML files.

use anyhow::{Context, Result};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Content source tiers
    pub sources: SourcesConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Relay job configuration
    pub relay: RelayConfig,

    /// Digest job configuration
    pub digest: DigestConfig,

    /// Notification configuration
    pub notify: NotifyConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Remote/offline content source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Primary remote quote API base URL
    pub primary_url: String,

    /// Secondary remote quote API base URL
    pub secondary_url: String,

    /// Per-call request timeout in seconds
    pub request_timeout_secs: u64,

    /// Probe attempts against the primary tier
    pub primary_probe_attempts: u32,

    /// Probe attempts against the secondary tier
    pub secondary_probe_attempts: u32,

    /// Base delay in milliseconds between probe attempts (linear backoff)
    pub probe_base_delay_ms: u64,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite database path
    pub sqlite_path: PathBuf,

    /// Seed file loaded when the store is empty at startup
    pub seed_path: Option<PathBuf>,
}

/// Relay job configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Interval between relay runs in seconds
    pub interval_secs: u64,

    /// Whether the relay job runs at all
    pub enabled: bool,
}

/// Digest job configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DigestConfig {
    /// Morning session fire time (HH:MM, local)
    pub morning: String,

    /// Afternoon session fire time (HH:MM, local)
    pub afternoon: String,

    /// Evening session fire time (HH:MM, local)
    pub evening: String,

    /// Whether the digest jobs run at all
    pub enabled: bool,
}

/// Notification configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// Webhook URL for digest delivery; the console channel is used when unset
    pub webhook_url: Option<String>,

    /// Webhook request timeout in seconds
    pub timeout_secs: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let primary_url = std::env::var("PROVERBLY_PRIMARY_URL")
            .unwrap_or_else(|_| String::from("https://zenquotes.io/api"));

        let secondary_url = std::env::var("PROVERBLY_SECONDARY_URL")
            .unwrap_or_else(|_| String::from("https://api.quotable.io"));

        let request_timeout_secs = std::env::var("PROVERBLY_REQUEST_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(5);

        let primary_probe_attempts = std::env::var("PROVERBLY_PRIMARY_PROBE_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(3);

        let secondary_probe_attempts = std::env::var("PROVERBLY_SECONDARY_PROBE_ATTEMPTS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(2);

        let probe_base_delay_ms = std::env::var("PROVERBLY_PROBE_BASE_DELAY_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(1000);

        let sqlite_path = std::env::var("PROVERBLY_SQLITE_PATH")
            .unwrap_or_else(|_| String::from("data/proverbs.db"))
            .into();

        let seed_path = std::env::var("PROVERBLY_SEED_PATH").ok().map(Into::into);

        let relay_interval_secs = std::env::var("PROVERBLY_RELAY_INTERVAL")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(3600);

        let morning =
            std::env::var("PROVERBLY_DIGEST_MORNING").unwrap_or_else(|_| String::from("09:00"));
        let afternoon =
            std::env::var("PROVERBLY_DIGEST_AFTERNOON").unwrap_or_else(|_| String::from("13:00"));
        let evening =
            std::env::var("PROVERBLY_DIGEST_EVENING").unwrap_or_else(|_| String::from("20:00"));

        let webhook_url = std::env::var("PROVERBLY_WEBHOOK_URL").ok();

        let notify_timeout_secs = std::env::var("PROVERBLY_WEBHOOK_TIMEOUT")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(10);

        let log_level =
            std::env::var("PROVERBLY_LOG_LEVEL").unwrap_or_else(|_| String::from("info"));

        let log_format =
            std::env::var("PROVERBLY_LOG_FORMAT").unwrap_or_else(|_| String::from("text"));

        Ok(Self {
            sources: SourcesConfig {
                primary_url,
                secondary_url,
                request_timeout_secs,
                primary_probe_attempts,
                secondary_probe_attempts,
                probe_base_delay_ms,
            },
            database: DatabaseConfig {
                sqlite_path,
                seed_path,
            },
            relay: RelayConfig {
                interval_secs: relay_interval_secs,
                enabled: true,
            },
            digest: DigestConfig {
                morning,
                afternoon,
                evening,
                enabled: true,
            },
            notify: NotifyConfig {
                webhook_url,
                timeout_secs: notify_timeout_secs,
            },
            logging: LoggingConfig {
                level: log_level,
                format: log_format,
            },
        })
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        for (name, url) in [
            ("sources.primary_url", &self.sources.primary_url),
            ("sources.secondary_url", &self.sources.secondary_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("{name} must start with http:// or https://");
            }
        }

        if self.sources.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than 0");
        }

        if self.sources.primary_probe_attempts == 0 || self.sources.secondary_probe_attempts == 0 {
            anyhow::bail!("probe attempt counts must be greater than 0");
        }

        if self.relay.interval_secs == 0 {
            anyhow::bail!("relay.interval_secs must be greater than 0");
        }

        for (name, time) in [
            ("digest.morning", &self.digest.morning),
            ("digest.afternoon", &self.digest.afternoon),
            ("digest.evening", &self.digest.evening),
        ] {
            if NaiveTime::parse_from_str(time, "%H:%M").is_err() {
                anyhow::bail!("{name}: invalid time '{time}', expected HH:MM");
            }
        }

        if let Some(url) = &self.notify.webhook_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("notify.webhook_url must start with http:// or https://");
            }
        }

        Ok(())
    }

    /// Get the per-call request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.sources.request_timeout_secs)
    }

    /// Get the relay interval as Duration
    #[must_use]
    pub fn relay_interval(&self) -> Duration {
        Duration::from_secs(self.relay.interval_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: SourcesConfig {
                primary_url: String::from("https://zenquotes.io/api"),
                secondary_url: String::from("https://api.quotable.io"),
                request_timeout_secs: 5,
                primary_probe_attempts: 3,
                secondary_probe_attempts: 2,
                probe_base_delay_ms: 1000,
            },
            database: DatabaseConfig {
                sqlite_path: PathBuf::from("data/proverbs.db"),
                seed_path: None,
            },
            relay: RelayConfig {
                interval_secs: 3600,
                enabled: true,
            },
            digest: DigestConfig {
                morning: String::from("09:00"),
                afternoon: String::from("13:00"),
                evening: String::from("20:00"),
                enabled: true,
            },
            notify: NotifyConfig {
                webhook_url: None,
                timeout_secs: 10,
            },
            logging: LoggingConfig {
                level: String::from("info"),
                format: String::from("text"),
            },
        }
    }
}
