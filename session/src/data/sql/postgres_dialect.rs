//! PostgreSQL SQL dialect implementation

use super::SqlDialect;

/// PostgreSQL SQL dialect
pub struct PostgresDialect;

impl SqlDialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn placeholder(&self, index: usize) -> String {
        format!("${}", index)
    }

    fn json_extract(&self, col: &str, path: &[&str]) -> String {
        // #>> returns text, so the bound value compares as a string
        format!("({}::jsonb #>> '{{{}}}')", col, path.join(","))
    }
}
