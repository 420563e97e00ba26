//! SQLite SQL dialect implementation

use super::SqlDialect;
use super::dialect::dollar_path;

/// SQLite SQL dialect
pub struct SqliteDialect;

impl SqlDialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }

    fn json_extract(&self, col: &str, path: &[&str]) -> String {
        // SQLite stores JSON as TEXT, json_extract reads it in place
        format!("json_extract({}, '{}')", col, dollar_path(path))
    }

    fn like(&self, col: &str, placeholder: &str) -> String {
        format!("{} LIKE {} ESCAPE '\\'", col, placeholder)
    }
}
