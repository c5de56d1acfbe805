//! Category tag normalization and alias resolution.

use ecolens_core::RankTables;

/// Normalizes a free-form category string into upstream tag form:
/// lower-cased, with spaces and underscores replaced by hyphens.
#[must_use]
pub fn normalize_category_tag(category: &str) -> String {
    category
        .to_lowercase()
        .replace([' ', '_'], "-")
}

/// Normalizes a category and applies the alias table.
///
/// The alias table corrects known upstream taxonomy drift (e.g. queries for
/// `ice-cream-tubs` only match under `ice-creams`). Unaliased tags pass
/// through unchanged.
#[must_use]
pub fn resolve_category_tag(tables: &RankTables, category: &str) -> String {
    let normalized = normalize_category_tag(category);
    match tables.alias(&normalized) {
        Some(alias) => {
            tracing::debug!(from = %normalized, to = %alias, "applied category alias");
            alias.to_string()
        }
        None => normalized,
    }
}
