//! proverbly - resilient quote and proverb agent
//!
//! Acquires short inspirational content from unreliable external sources and
//! serves it with high availability: probed source tiers with an offline
//! terminal tier, per-call fallback cascades with payload normalization, a
//! no-repeat selection engine, and scheduled relay/digest jobs.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`source`] - Tiered content acquisition (probe, cascade, normalization)
//! - [`selector`] - No-repeat selection over stored pools
//! - [`scheduler`] - Relay and digest jobs on explicit timers
//! - [`storage`] - Proverb persistence (SQLite) and bulk seeding
//! - [`notify`] - Digest delivery channels
//! - [`models`] - Core data structures and types
//!
//! # Example
//!
//! ```no_run
//! use proverbly::config::Config;
//! use proverbly::source::ContentFetcher;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let fetcher = ContentFetcher::connect(&config.sources, None).await?;
//!     let quote = fetcher.fetch().await;
//!     println!("{quote}");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod notify;
pub mod scheduler;
pub mod selector;
pub mod source;
pub mod storage;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Error, ErrorCategory, Result};
    pub use crate::models::{ContentItem, DigestSession, Origin, Quote};
    pub use crate::selector::NoRepeatSelector;
    pub use crate::source::{ContentFetcher, HealthProbe, Tier, TierSelector};
    pub use crate::storage::{ProverbRepository, SqliteProverbRepository};
}

// Direct re-exports for convenience
pub use models::{ContentItem, DigestSession, Origin, Quote};
