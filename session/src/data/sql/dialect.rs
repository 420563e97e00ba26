//! SQL dialect trait for multi-database support
//!
//! This trait defines the interface for generating database-specific SQL syntax.

/// SQL dialect trait for generating database-specific SQL
///
/// Different databases have different syntax for:
/// - Parameter placeholders (? vs $1)
/// - JSON attribute extraction
/// - Limit/offset clauses
pub trait SqlDialect: Send + Sync {
    /// Get the dialect name
    fn name(&self) -> &'static str;

    /// Generate a parameter placeholder for the given index (1-based)
    ///
    /// - MySQL/SQLite: Always returns "?"
    /// - PostgreSQL: Returns "$1", "$2", etc.
    fn placeholder(&self, index: usize) -> String;

    /// Extract a nested attribute from a JSON-typed column
    ///
    /// `path` holds the already-validated key segments below the column root.
    ///
    /// - MySQL: `JSON_EXTRACT(col, '$.a.b')`
    /// - SQLite: `json_extract(col, '$.a.b')`
    /// - PostgreSQL: `(col::jsonb #>> '{a,b}')`
    fn json_extract(&self, col: &str, path: &[&str]) -> String;

    /// Generate a substring match against a bound, already-escaped pattern
    ///
    /// MySQL and PostgreSQL treat backslash as the default LIKE escape
    /// character; SQLite needs it spelled out.
    fn like(&self, col: &str, placeholder: &str) -> String {
        format!("{} LIKE {}", col, placeholder)
    }

    /// Generate LIMIT/OFFSET clause
    ///
    /// Most databases use `LIMIT x OFFSET y`, but syntax may vary.
    fn limit_offset(&self, limit: i64, offset: i64) -> String {
        format!("LIMIT {} OFFSET {}", limit, offset)
    }

    /// Generate a single ORDER BY term
    fn order_by(&self, col: &str, desc: bool) -> String {
        let dir = if desc { "DESC" } else { "ASC" };
        format!("{} {}", col, dir)
    }
}

/// JSONPath form shared by MySQL and SQLite (`$.a.b`)
pub(super) fn dollar_path(path: &[&str]) -> String {
    let mut out = String::from("$");
    for segment in path {
        out.push('.');
        out.push_str(segment);
    }
    out
}
