//! Sort resolution
//!
//! Exactly one sort key. The field is not filtered by the guard: it is
//! normalized and applied as given, and the builder reports fields that
//! would have failed the guard to the observer.

use std::fmt;

/// Sort field used when the caller gives no field or no order
pub const DEFAULT_SORT_FIELD: &str = "created_time";

/// Raw order value that selects ascending order
pub const ASCEND: &str = "ascend";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Ascend,
    #[default]
    Descend,
}

impl SortOrder {
    /// Only the exact string `"ascend"` is ascending; everything else,
    /// including unknown values, sorts descending.
    pub fn parse(raw: &str) -> Self {
        if raw == ASCEND {
            Self::Ascend
        } else {
            Self::Descend
        }
    }

    pub fn is_descending(&self) -> bool {
        matches!(self, Self::Descend)
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascend => write!(f, "ascend"),
            Self::Descend => write!(f, "descend"),
        }
    }
}

/// Effective sort key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    field: String,
    order: SortOrder,
}

impl SortSpec {
    /// Typed constructor; an empty field falls back to the default
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        let field = field.into();
        let field = if field.is_empty() {
            DEFAULT_SORT_FIELD.to_string()
        } else {
            field
        };
        Self { field, order }
    }

    /// Resolve raw query-string values.
    ///
    /// An empty field *or* an empty order selects [`DEFAULT_SORT_FIELD`].
    pub fn from_raw(field: &str, order: &str) -> Self {
        let field = if field.is_empty() || order.is_empty() {
            DEFAULT_SORT_FIELD
        } else {
            field
        };
        Self {
            field: field.to_string(),
            order: SortOrder::parse(order),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }
}

impl Default for SortSpec {
    fn default() -> Self {
        Self::new(DEFAULT_SORT_FIELD, SortOrder::Descend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_field_defaults() {
        let sort = SortSpec::from_raw("", "ascend");
        assert_eq!(sort.field(), "created_time");
        assert_eq!(sort.order(), SortOrder::Ascend);
    }

    #[test]
    fn empty_order_defaults_field_too() {
        let sort = SortSpec::from_raw("displayName", "");
        assert_eq!(sort.field(), "created_time");
        assert_eq!(sort.order(), SortOrder::Descend);
    }

    #[test]
    fn unknown_order_is_descending() {
        for raw in ["descend", "asc", "ASCEND", "up", " ascend"] {
            assert_eq!(SortOrder::parse(raw), SortOrder::Descend, "{raw}");
        }
        assert_eq!(SortOrder::parse("ascend"), SortOrder::Ascend);
    }

    #[test]
    fn explicit_field_kept() {
        let sort = SortSpec::from_raw("displayName", "descend");
        assert_eq!(sort.field(), "displayName");
        assert!(sort.order().is_descending());
    }

    #[test]
    fn typed_constructor_defaults_empty_field() {
        assert_eq!(SortSpec::new("", SortOrder::Ascend).field(), DEFAULT_SORT_FIELD);
        assert_eq!(SortSpec::default().order(), SortOrder::Descend);
    }
}
