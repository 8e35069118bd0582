//! Unified error handling for the proverbly crate
//!
//! Domain-specific errors live next to the code that raises them and are
//! consolidated here into a single [`Error`] enum for use across module
//! boundaries.
//!
//! Propagation policy: network, transport, and parsing failures are contained
//! inside the source module (the fetch cascade and the health probe recover
//! from them locally). Only [`Error::EmptyPool`] is surfaced to callers of
//! the selection entry points; it marks a caller precondition violation, not
//! a transient fault.

use std::io;
use thiserror::Error;

// Re-export domain-specific errors for convenience
pub use crate::notify::NotifyError;
pub use crate::source::error::FetchError;

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Network-related errors (HTTP, timeout, unreachable tier)
    Network,
    /// Payload parsing and extraction errors
    Parsing,
    /// Storage and I/O errors
    Storage,
    /// Notification delivery errors
    Delivery,
    /// Pool-level "nothing to select" condition
    Pool,
    /// Configuration and validation errors
    Config,
    /// Other/unknown errors
    Other,
}

/// Unified error type for the proverbly crate
#[derive(Error, Debug)]
pub enum Error {
    /// Content fetch errors (transport or payload)
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Notification delivery errors
    #[error("Delivery error: {0}")]
    Notify(#[from] NotifyError),

    /// No items available for the requested category
    #[error("No items available: {0}")]
    EmptyPool(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[source] rusqlite::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{context}")]
    Other {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    /// Check if this error is recoverable (worth another attempt later)
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Fetch(e) => e.is_transport(),
            Self::Notify(_) => true,
            Self::EmptyPool(_) => false,
            Self::Database(_) => false,
            Self::Io(_) => true,
            Self::Json(_) => false,
            Self::Http(_) => true,
            Self::Config(_) => false,
            Self::Other { .. } => false,
        }
    }

    /// Get the error category for handling strategies
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Fetch(e) if e.is_transport() => ErrorCategory::Network,
            Self::Fetch(_) => ErrorCategory::Parsing,
            Self::Notify(_) => ErrorCategory::Delivery,
            Self::EmptyPool(_) => ErrorCategory::Pool,
            Self::Database(_) | Self::Io(_) => ErrorCategory::Storage,
            Self::Json(_) => ErrorCategory::Parsing,
            Self::Http(_) => ErrorCategory::Network,
            Self::Config(_) => ErrorCategory::Config,
            Self::Other { .. } => ErrorCategory::Other,
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an empty-pool error for a category key
    pub fn empty_pool(key: impl Into<String>) -> Self {
        Self::EmptyPool(key.into())
    }

    /// Create a generic error with context
    pub fn other(context: impl Into<String>) -> Self {
        Self::Other {
            context: context.into(),
            source: None,
        }
    }
}

// Conversion from rusqlite::Error
impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err)
    }
}

// Conversion from anyhow::Error
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other {
            context: err.to_string(),
            source: None,
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_category() {
        let fetch_err = Error::Fetch(FetchError::Timeout);
        assert_eq!(fetch_err.category(), ErrorCategory::Network);

        let malformed = Error::Fetch(FetchError::Malformed("bad payload".into()));
        assert_eq!(malformed.category(), ErrorCategory::Parsing);

        let pool = Error::empty_pool("Yoruba");
        assert_eq!(pool.category(), ErrorCategory::Pool);
    }

    #[test]
    fn test_is_recoverable() {
        assert!(Error::Fetch(FetchError::Timeout).is_recoverable());
        assert!(!Error::Fetch(FetchError::Malformed("x".into())).is_recoverable());
        assert!(!Error::empty_pool("ALL").is_recoverable());
        assert!(!Error::config("bad endpoint").is_recoverable());
    }

    #[test]
    fn test_config_error() {
        let err = Error::config("invalid endpoint");
        assert_eq!(err.category(), ErrorCategory::Config);
        assert!(err.to_string().contains("invalid endpoint"));
    }

    #[test]
    fn test_empty_pool_message() {
        let err = Error::empty_pool("Igbo");
        assert!(err.to_string().contains("Igbo"));
    }
}
