//! Error types for content acquisition
//!
//! These errors never escape `ContentFetcher::fetch` or `HealthProbe::probe`;
//! they drive the tier cascade internally and are logged at the point of
//! recovery.

use thiserror::Error;

/// Errors that can occur while fetching from a content tier
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport failure, connection refusal, or timeout
    #[error("tier unreachable: {0}")]
    Unreachable(String),

    /// HTTP request error
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server responded with a non-success status
    #[error("server error: {0}")]
    ServerError(u16),

    /// Request timeout
    #[error("request timeout")]
    Timeout,

    /// Payload matched none of the recognized schemas, or the extracted
    /// content was blank
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl FetchError {
    /// Whether the failure is a reachability problem (as opposed to a
    /// payload problem). Both cascade identically; the distinction only
    /// affects logging.
    pub fn is_transport(&self) -> bool {
        !matches!(self, Self::Malformed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_classification() {
        assert!(FetchError::Timeout.is_transport());
        assert!(FetchError::ServerError(503).is_transport());
        assert!(FetchError::Unreachable("dns".into()).is_transport());
        assert!(!FetchError::Malformed("no schema matched".into()).is_transport());
    }
}
