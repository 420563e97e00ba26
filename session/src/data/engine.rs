//! Store collaborators
//!
//! The session builder never talks to a database. It asks a [`StoreEngine`]
//! for a fresh, empty session and a [`ConfigSource`] for process-wide
//! settings such as the table-name prefix.

use std::collections::HashMap;

use super::error::DataError;
use super::session::QueryPlan;
use super::sql::Backend;

/// Hands out fresh, preparable query sessions
pub trait StoreEngine: Send + Sync {
    /// Backend the prepared sessions will be rendered for
    fn backend(&self) -> Backend;

    /// Obtain a new, empty session
    fn prepare(&self) -> Result<QueryPlan, DataError>;
}

/// Resolves configuration strings by key
pub trait ConfigSource: Send + Sync {
    fn config_string(&self, key: &str) -> Result<String, DataError>;
}

impl ConfigSource for HashMap<String, String> {
    fn config_string(&self, key: &str) -> Result<String, DataError> {
        self.get(key)
            .cloned()
            .ok_or_else(|| DataError::missing_key(key))
    }
}

/// Default engine: every session starts as an empty plan
#[derive(Debug, Clone, Copy, Default)]
pub struct Engine {
    backend: Backend,
}

impl Engine {
    pub fn new(backend: Backend) -> Self {
        Self { backend }
    }
}

impl StoreEngine for Engine {
    fn backend(&self) -> Backend {
        self.backend
    }

    fn prepare(&self) -> Result<QueryPlan, DataError> {
        tracing::trace!(backend = %self.backend, "Preparing query session");
        Ok(QueryPlan::new())
    }
}
