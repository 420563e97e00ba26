//! Criteria parsing
//!
//! List endpoints carry filter criteria as a JSON array of
//! `{"field": ..., "value": ...}` objects. Size limits are enforced here, at
//! the transport boundary; field safety is decided later by the builder.

use crate::data::error::DataError;

use super::filter::FilterCriterion;

/// Maximum size of criteria JSON in bytes (64KB)
const MAX_CRITERIA_JSON_SIZE: usize = 64 * 1024;

/// Maximum number of criteria allowed
const MAX_CRITERIA: usize = 50;

/// Parse criteria from a JSON query param. An empty or blank string is an
/// empty list.
pub fn parse_criteria(json_str: &str) -> Result<Vec<FilterCriterion>, DataError> {
    if json_str.trim().is_empty() {
        return Ok(Vec::new());
    }

    if json_str.len() > MAX_CRITERIA_JSON_SIZE {
        return Err(DataError::InvalidCriteria(format!(
            "criteria JSON exceeds maximum size of {} bytes",
            MAX_CRITERIA_JSON_SIZE
        )));
    }

    let criteria: Vec<FilterCriterion> = serde_json::from_str(json_str)
        .map_err(|e| DataError::InvalidCriteria(e.to_string()))?;

    if criteria.len() > MAX_CRITERIA {
        return Err(DataError::InvalidCriteria(format!(
            "maximum {} criteria allowed",
            MAX_CRITERIA
        )));
    }

    Ok(criteria)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_criteria_valid_json() {
        let json = r#"[
            {"field": "displayName", "value": "ali"},
            {"field": "profile.age", "value": "30"}
        ]"#;
        let criteria = parse_criteria(json).unwrap();
        assert_eq!(
            criteria,
            vec![
                FilterCriterion::new("displayName", "ali"),
                FilterCriterion::new("profile.age", "30"),
            ]
        );
    }

    #[test]
    fn parse_criteria_empty_input() {
        assert!(parse_criteria("").unwrap().is_empty());
        assert!(parse_criteria("  ").unwrap().is_empty());
        assert!(parse_criteria("[]").unwrap().is_empty());
    }

    #[test]
    fn parse_criteria_invalid_json() {
        let result = parse_criteria("not valid json");
        assert!(matches!(result, Err(DataError::InvalidCriteria(_))));
    }

    #[test]
    fn parse_criteria_missing_value() {
        let result = parse_criteria(r#"[{"field": "name"}]"#);
        assert!(result.is_err());
    }

    #[test]
    fn parse_criteria_too_many() {
        let items: Vec<String> = (0..=MAX_CRITERIA)
            .map(|i| format!(r#"{{"field": "name", "value": "{}"}}"#, i))
            .collect();
        let json = format!("[{}]", items.join(","));
        let result = parse_criteria(&json);
        assert!(matches!(result, Err(DataError::InvalidCriteria(_))));
    }

    #[test]
    fn parse_criteria_too_large() {
        let value = "x".repeat(MAX_CRITERIA_JSON_SIZE);
        let json = format!(r#"[{{"field": "name", "value": "{}"}}]"#, value);
        let err = parse_criteria(&json).unwrap_err();
        assert!(err.to_string().contains("maximum size"));
    }
}
