//! Tiered content acquisition with probing, cascade, and normalization
//!
//! Content comes from an ordered list of tiers: two independent remote quote
//! APIs followed by an offline generator that never fails. At startup the
//! [`TierSelector`] probes the tiers in priority order and fixes the
//! preferred one; each [`ContentFetcher::fetch`] call then cascades from the
//! preferred tier through the remaining ones until something yields a usable
//! quote, bottoming out in a hardcoded synthetic quote.
//!
//! # Modules
//!
//! - [`tier`] - Tier definitions and startup-time tier resolution
//! - [`probe`] - Bounded-retry reachability checks with linear backoff
//! - [`schema`] - Ordered parser strategies over heterogeneous payloads
//! - [`offline`] - Canned-quote generator wrapped in the common JSON shape
//! - [`fetch`] - The per-call fallback cascade
//! - [`error`] - Fetch error types (contained within this module)

pub mod error;
pub mod fetch;
pub mod offline;
pub mod probe;
pub mod schema;
pub mod tier;

pub use error::FetchError;
pub use fetch::{ContentFetcher, SYNTHETIC_AUTHOR};
pub use probe::HealthProbe;
pub use tier::{tiers_from_config, Tier, TierKind, TierSelector};
