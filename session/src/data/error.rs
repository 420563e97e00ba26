//! Unified error type for the data layer
//!
//! The session builder never fails on malformed filter or sort input. The
//! variants here cover collaborator failures, which are surfaced unchanged,
//! and transport-level criteria parsing.

use thiserror::Error;

/// Unified error type for data layer operations
#[derive(Error, Debug)]
pub enum DataError {
    /// Configuration lookup failed
    #[error("Configuration error: {0}")]
    Config(String),

    /// The engine could not hand out a session
    #[error("Session unavailable on {backend}: {reason}")]
    SessionUnavailable {
        backend: &'static str,
        reason: String,
    },

    /// Criteria payload rejected before building
    #[error("Invalid filter criteria: {0}")]
    InvalidCriteria(String),
}

impl DataError {
    /// Create a missing configuration key error
    pub fn missing_key(key: &str) -> Self {
        Self::Config(format!("unknown configuration key '{}'", key))
    }

    /// Create a session unavailable error
    pub fn session_unavailable(backend: &'static str, reason: impl Into<String>) -> Self {
        Self::SessionUnavailable {
            backend,
            reason: reason.into(),
        }
    }
}
