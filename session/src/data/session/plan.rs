//! Composed query description
//!
//! A [`QueryPlan`] is what the store executes: AND-combined predicates, one
//! sort key, an optional aliased inner join, an optional projection and an
//! optional row window. Column names inside a plan have already passed the
//! guard (or, for sort, been normalized); values only ever appear as bound
//! parameters.

use crate::data::sql::SqlDialect;
use crate::utils::sql::contains_pattern;

use super::pagination::Window;
use super::sort::SortOrder;

/// Collects SQL parameters during rendering (maintains insertion order)
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SqlParams {
    pub values: Vec<String>,
}

impl SqlParams {
    /// Append a value, returning its 1-based placeholder index
    pub fn push(&mut self, value: String) -> usize {
        self.values.push(value);
        self.values.len()
    }
}

/// A single AND-combined condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// `column = ?`
    Equals { column: String, value: String },
    /// `column LIKE ?` bound to `%value%` (metacharacters escaped)
    Contains { column: String, value: String },
    /// Exact match on one attribute of a JSON column
    JsonPathEquals {
        column: String,
        path: Vec<String>,
        value: String,
    },
}

impl Predicate {
    pub fn column(&self) -> &str {
        match self {
            Self::Equals { column, .. }
            | Self::Contains { column, .. }
            | Self::JsonPathEquals { column, .. } => column,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Self::Equals { value, .. }
            | Self::Contains { value, .. }
            | Self::JsonPathEquals { value, .. } => value,
        }
    }

    fn to_sql(&self, dialect: &dyn SqlDialect, params: &mut SqlParams) -> String {
        match self {
            Self::Equals { column, value } => {
                let idx = params.push(value.clone());
                format!("{} = {}", column, dialect.placeholder(idx))
            }
            Self::Contains { column, value } => {
                let idx = params.push(contains_pattern(value));
                dialect.like(column, &dialect.placeholder(idx))
            }
            Self::JsonPathEquals {
                column,
                path,
                value,
            } => {
                let idx = params.push(value.clone());
                let path: Vec<&str> = path.iter().map(String::as_str).collect();
                format!(
                    "{} = {}",
                    dialect.json_extract(column, &path),
                    dialect.placeholder(idx)
                )
            }
        }
    }
}

/// `INNER JOIN <table> AS <alias> ON <on>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
    pub table: String,
    pub alias: String,
    pub on: String,
}

/// Single sort key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderClause {
    pub column: String,
    pub order: SortOrder,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryPlan {
    table_alias: Option<String>,
    joins: Vec<Join>,
    projection: Option<String>,
    predicates: Vec<Predicate>,
    order: Option<OrderClause>,
    window: Option<Window>,
}

impl QueryPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to a row window
    pub fn limit(&mut self, window: Window) -> &mut Self {
        self.window = Some(window);
        self
    }

    /// AND another predicate
    pub fn and(&mut self, predicate: Predicate) -> &mut Self {
        self.predicates.push(predicate);
        self
    }

    /// Alias the primary table
    pub fn alias(&mut self, alias: impl Into<String>) -> &mut Self {
        self.table_alias = Some(alias.into());
        self
    }

    pub fn inner_join(
        &mut self,
        table: impl Into<String>,
        alias: impl Into<String>,
        on: impl Into<String>,
    ) -> &mut Self {
        self.joins.push(Join {
            table: table.into(),
            alias: alias.into(),
            on: on.into(),
        });
        self
    }

    /// Override the selected columns
    pub fn select(&mut self, projection: impl Into<String>) -> &mut Self {
        self.projection = Some(projection.into());
        self
    }

    /// Set the sort key, replacing any previous one
    pub fn order_by(&mut self, column: impl Into<String>, order: SortOrder) -> &mut Self {
        self.order = Some(OrderClause {
            column: column.into(),
            order,
        });
        self
    }

    pub fn table_alias(&self) -> Option<&str> {
        self.table_alias.as_deref()
    }

    pub fn joins(&self) -> &[Join] {
        &self.joins
    }

    pub fn projection(&self) -> Option<&str> {
        self.projection.as_deref()
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn order(&self) -> Option<&OrderClause> {
        self.order.as_ref()
    }

    pub fn window(&self) -> Option<Window> {
        self.window
    }

    /// Render the row query against `table`
    pub fn to_sql(&self, table: &str, dialect: &dyn SqlDialect) -> (String, SqlParams) {
        let mut params = SqlParams::default();
        let mut sql = format!(
            "SELECT {} FROM {}",
            self.projection.as_deref().unwrap_or("*"),
            self.from_clause(table)
        );
        self.push_where(&mut sql, dialect, &mut params);

        if let Some(order) = &self.order {
            sql.push_str(" ORDER BY ");
            sql.push_str(&dialect.order_by(&order.column, order.order.is_descending()));
        }
        if let Some(window) = self.window {
            sql.push(' ');
            sql.push_str(&dialect.limit_offset(window.limit, window.offset));
        }

        (sql, params)
    }

    /// Render the matching row count: same tables and predicates, no
    /// window, order or projection
    pub fn to_count_sql(&self, table: &str, dialect: &dyn SqlDialect) -> (String, SqlParams) {
        let mut params = SqlParams::default();
        let mut sql = format!("SELECT COUNT(*) FROM {}", self.from_clause(table));
        self.push_where(&mut sql, dialect, &mut params);
        (sql, params)
    }

    fn from_clause(&self, table: &str) -> String {
        let mut from = match &self.table_alias {
            Some(alias) => format!("{} AS {}", table, alias),
            None => table.to_string(),
        };
        for join in &self.joins {
            from.push_str(&format!(
                " INNER JOIN {} AS {} ON {}",
                join.table, join.alias, join.on
            ));
        }
        from
    }

    fn push_where(&self, sql: &mut String, dialect: &dyn SqlDialect, params: &mut SqlParams) {
        if self.predicates.is_empty() {
            return;
        }
        let conditions: Vec<String> = self
            .predicates
            .iter()
            .map(|p| p.to_sql(dialect, params))
            .collect();
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }
}
