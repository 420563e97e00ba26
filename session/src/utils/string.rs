//! String utility functions

/// Convert an API field name to the store's snake_case column convention.
///
/// An underscore is inserted before every ASCII uppercase letter that follows
/// at least one non-underscore character. The result is lowercased and spaces
/// are removed, so `displayName` becomes `display_name` and `a.createdTime`
/// becomes `a.created_time`. Total for every input.
pub fn snake_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() * 2);
    let mut seen_word = false;

    for (i, c) in s.chars().enumerate() {
        if i > 0 && c.is_ascii_uppercase() && seen_word {
            out.push('_');
        }
        if c != '_' {
            seen_word = true;
        }
        out.push(c);
    }

    out.to_lowercase().replace(' ', "")
}
