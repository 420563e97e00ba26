//! MySQL SQL dialect implementation

use super::SqlDialect;
use super::dialect::dollar_path;

/// MySQL SQL dialect
pub struct MysqlDialect;

impl SqlDialect for MysqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn placeholder(&self, _index: usize) -> String {
        "?".to_string()
    }

    fn json_extract(&self, col: &str, path: &[&str]) -> String {
        format!("JSON_EXTRACT({}, '{}')", col, dollar_path(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder() {
        let dialect = MysqlDialect;
        assert_eq!(dialect.placeholder(1), "?");
        assert_eq!(dialect.placeholder(7), "?");
    }

    #[test]
    fn test_json_extract() {
        let dialect = MysqlDialect;
        assert_eq!(
            dialect.json_extract("a.profile", &["age"]),
            "JSON_EXTRACT(a.profile, '$.age')"
        );
        assert_eq!(
            dialect.json_extract("properties", &["address", "city"]),
            "JSON_EXTRACT(properties, '$.address.city')"
        );
    }

    #[test]
    fn test_like_relies_on_default_escape() {
        let dialect = MysqlDialect;
        assert_eq!(dialect.like("a.display_name", "?"), "a.display_name LIKE ?");
    }

    #[test]
    fn test_limit_offset() {
        let dialect = MysqlDialect;
        assert_eq!(dialect.limit_offset(10, 20), "LIMIT 10 OFFSET 20");
    }

    #[test]
    fn test_order_by() {
        let dialect = MysqlDialect;
        assert_eq!(dialect.order_by("created_time", true), "created_time DESC");
        assert_eq!(dialect.order_by("a.name", false), "a.name ASC");
    }
}
