//! Row window interpretation
//!
//! Callers historically passed `-1` for offset and limit to mean "no
//! pagination". [`Pagination::from_raw`] keeps that encoding at the boundary
//! and everything past it works with the explicit enum.

/// Legacy "disabled" marker for offset and limit
pub const SENTINEL: i64 = -1;

/// Exactly `limit` rows starting at `offset`.
///
/// Values are kept as the caller sent them; range checks belong to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub offset: i64,
    pub limit: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Pagination {
    /// No window; also selects the direct (unaliased) join strategy
    #[default]
    Unbounded,
    Window(Window),
}

impl Pagination {
    pub fn window(offset: i64, limit: i64) -> Self {
        Self::Window(Window { offset, limit })
    }

    /// Interpret sentinel-encoded offset/limit.
    ///
    /// Active iff neither value is [`SENTINEL`]. Other values, negative or
    /// huge, pass through untouched for the store to accept or reject.
    pub fn from_raw(offset: i64, limit: i64) -> Self {
        if offset == SENTINEL || limit == SENTINEL {
            return Self::Unbounded;
        }
        Self::window(offset, limit)
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Window(_))
    }

    pub fn as_window(&self) -> Option<Window> {
        match self {
            Self::Unbounded => None,
            Self::Window(window) => Some(*window),
        }
    }
}
