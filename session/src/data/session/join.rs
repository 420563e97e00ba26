//! Join strategy
//!
//! Listing with a row window sorts on the primary table's own column and
//! projects rows from the joined user table, so pagination is stable no
//! matter how many rows the join produces. Lookups without a window read the
//! primary table directly.

use crate::data::engine::ConfigSource;
use crate::data::error::DataError;

use super::pagination::Pagination;
use super::plan::QueryPlan;

/// Alias of the primary table under [`JoinStrategy::UserTable`]
pub const PRIMARY_ALIAS: &str = "a";

/// Alias of the joined user table
pub const USER_ALIAS: &str = "b";

/// Unprefixed name of the user table
pub const USER_TABLE: &str = "user";

/// Configuration key holding the table-name prefix
pub const TABLE_PREFIX_KEY: &str = "tableNamePrefix";

const USER_JOIN_ON: &str = "a.owner = b.owner and a.name = b.name";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JoinStrategy {
    /// Primary table only, no alias
    #[default]
    Direct,
    /// Primary table as `a`, inner-joined with the user table as `b`
    UserTable,
}

impl JoinStrategy {
    /// Strategy the user-aware entry points derive from the row window
    pub fn for_pagination(pagination: &Pagination) -> Self {
        if pagination.is_active() {
            Self::UserTable
        } else {
            Self::Direct
        }
    }

    /// Qualify a primary-table column for this strategy
    pub fn qualify(&self, column: &str) -> String {
        match self {
            Self::Direct => column.to_string(),
            Self::UserTable => format!("{}.{}", PRIMARY_ALIAS, column),
        }
    }

    /// Alias the primary table and add the join. The prefix is only looked
    /// up when a join is actually added.
    pub(crate) fn attach(
        &self,
        plan: &mut QueryPlan,
        config: &dyn ConfigSource,
    ) -> Result<(), DataError> {
        if let Self::UserTable = self {
            let prefix = config.config_string(TABLE_PREFIX_KEY)?;
            let table = format!("{}{}", prefix, USER_TABLE);
            tracing::trace!(table = %table, "Joining user table");
            plan.alias(PRIMARY_ALIAS)
                .inner_join(table, USER_ALIAS, USER_JOIN_ON);
        }
        Ok(())
    }

    /// Select the joined table's columns
    pub(crate) fn project(&self, plan: &mut QueryPlan) {
        if let Self::UserTable = self {
            plan.select(format!("{}.*", USER_ALIAS));
        }
    }
}
