//! Cleaning of tag-style strings into human-readable lists.
//!
//! The upstream source ships labels as one comma-delimited string and
//! categories as a language-prefixed hierarchy (`"en:plant-based-foods"`).

use serde_json::Value;

/// Strips a leading language prefix (`"en:"`, `"fr:"`, ...) if present.
#[must_use]
pub fn strip_language_prefix(tag: &str) -> &str {
    match tag.split_once(':') {
        Some((prefix, rest))
            if (2..=3).contains(&prefix.len()) && prefix.chars().all(|c| c.is_ascii_alphabetic()) =>
        {
            rest
        }
        _ => tag,
    }
}

/// Splits a comma-delimited label string into cleaned, title-cased names.
///
/// Per-token: trim whitespace, drop empties, strip the language prefix,
/// replace hyphens with spaces, title-case.
#[must_use]
pub fn normalize_labels(labels: &str) -> Vec<String> {
    labels
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| title_case(&strip_language_prefix(token).replace('-', " ")))
        .collect()
}

/// Filters a category hierarchy to its English entries, cleaned for display.
///
/// Non-string and non-English entries are dropped silently; the original
/// hierarchy order is preserved.
#[must_use]
pub fn normalize_categories(hierarchy: &[Value]) -> Vec<String> {
    hierarchy
        .iter()
        .filter_map(Value::as_str)
        .filter_map(|tag| tag.strip_prefix("en:"))
        .map(|tag| title_case(&tag.replace('-', " ")))
        .collect()
}

/// Upper-cases the first letter of each word and lower-cases the rest.
fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
