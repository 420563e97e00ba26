//! LIKE pattern helpers

/// Backslash-escape the LIKE wildcards `%` and `_` (and `\` itself) so a
/// caller's filter value only ever matches literally.
///
/// ```
/// use ormer_session::utils::sql::escape_like_pattern;
///
/// assert_eq!(escape_like_pattern("50%_off"), "50\\%\\_off");
/// ```
pub fn escape_like_pattern(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Substring pattern for a `LIKE` predicate
pub fn contains_pattern(s: &str) -> String {
    format!("%{}%", escape_like_pattern(s))
}
