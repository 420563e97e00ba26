//! Diagnostic hook for lenient filtering
//!
//! Malformed or unsafe filter fields are dropped instead of failing the
//! query. Observers see every drop so callers can audit what was ignored
//! without changing query semantics.

use std::fmt;

use parking_lot::Mutex;

/// Why a caller-supplied field did not become a predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Field or value was empty
    Empty,
    /// Field failed the safety guard
    Unsafe,
    /// Dotted path with an empty or invalid subpath
    MalformedPath,
}

impl DropReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Unsafe => "unsafe",
            Self::MalformedPath => "malformed_path",
        }
    }
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Receives filter and sort diagnostics from the session builder
pub trait FieldObserver: Send + Sync {
    /// A filter field was omitted from the plan
    fn field_dropped(&self, field: &str, reason: DropReason);

    /// A sort field that fails the guard was applied anyway
    fn unguarded_sort(&self, _field: &str) {}
}

/// Default observer, reports through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl FieldObserver for TracingObserver {
    fn field_dropped(&self, field: &str, reason: DropReason) {
        tracing::debug!(field = %field, reason = %reason, "Dropped filter field");
    }

    fn unguarded_sort(&self, field: &str) {
        tracing::warn!(field = %field, "Sorting by a field outside the guard");
    }
}

/// One recorded observation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEvent {
    Dropped { field: String, reason: DropReason },
    UnguardedSort { field: String },
}

/// Observer that keeps every event in memory, for audits and tests
#[derive(Debug, Default)]
pub struct CollectingObserver {
    events: Mutex<Vec<FieldEvent>>,
}

impl CollectingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events seen so far, in order
    pub fn events(&self) -> Vec<FieldEvent> {
        self.events.lock().clone()
    }

    /// Fields dropped so far, in order
    pub fn dropped(&self) -> Vec<(String, DropReason)> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                FieldEvent::Dropped { field, reason } => Some((field.clone(), *reason)),
                FieldEvent::UnguardedSort { .. } => None,
            })
            .collect()
    }
}

impl FieldObserver for CollectingObserver {
    fn field_dropped(&self, field: &str, reason: DropReason) {
        self.events.lock().push(FieldEvent::Dropped {
            field: field.to_string(),
            reason,
        });
    }

    fn unguarded_sort(&self, field: &str) {
        self.events.lock().push(FieldEvent::UnguardedSort {
            field: field.to_string(),
        });
    }
}
