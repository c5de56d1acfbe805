use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::ConfigError;

/// Static lookup tables for the category-recommendation path.
///
/// Both tables are data, not code: known upstream taxonomy inconsistencies
/// (alias table) and the grade→score mapping change independently of the
/// ranking logic, so they are supplied at construction and can be overridden
/// from a YAML file.
#[derive(Debug, Clone, Deserialize)]
pub struct RankTables {
    /// Corrections for known upstream category-taxonomy drift, keyed and
    /// valued by normalized tags (lowercase, hyphen-separated).
    #[serde(default)]
    pub category_aliases: HashMap<String, String>,
    /// Default score per eco-score grade, used when a candidate has no
    /// parseable numeric score.
    #[serde(default)]
    pub grade_scores: HashMap<String, f64>,
    /// Absolute fallback score when neither a numeric score nor a grade is
    /// available.
    #[serde(default = "default_fallback_score")]
    pub fallback_score: f64,
    /// Grade assigned to candidates whose upstream record carries none.
    #[serde(default = "default_grade")]
    pub default_grade: String,
}

fn default_fallback_score() -> f64 {
    50.0
}

fn default_grade() -> String {
    "c".to_string()
}

impl Default for RankTables {
    fn default() -> Self {
        let category_aliases = [
            ("ice-creams-and-sorbets", "ice-creams"),
            ("ice-cream-tubs", "ice-creams"),
            ("frozen-foods", "frozen-products"),
            ("frozen-desserts", "frozen-desserts"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let grade_scores = [("a", 80.0), ("b", 65.0), ("c", 50.0), ("d", 35.0), ("e", 20.0)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();

        Self {
            category_aliases,
            grade_scores,
            fallback_score: default_fallback_score(),
            default_grade: default_grade(),
        }
    }
}

impl RankTables {
    /// Looks up the default score for a grade, case-insensitively.
    #[must_use]
    pub fn grade_score(&self, grade: &str) -> Option<f64> {
        self.grade_scores.get(&grade.to_lowercase()).copied()
    }

    /// Looks up a category alias for an already-normalized tag.
    #[must_use]
    pub fn alias(&self, tag: &str) -> Option<&str> {
        self.category_aliases.get(tag).map(String::as_str)
    }
}

/// Load and validate rank tables from a YAML file.
///
/// Missing keys fall back to the same defaults as [`RankTables::default`]'s
/// scalar fields; an entirely absent file should be handled by the caller by
/// using `RankTables::default()` instead.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation.
pub fn load_rank_tables(path: &Path) -> Result<RankTables, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::TablesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let tables: RankTables = serde_yaml::from_str(&content)?;
    validate_tables(&tables)?;
    Ok(tables)
}

fn validate_tables(tables: &RankTables) -> Result<(), ConfigError> {
    for (grade, score) in &tables.grade_scores {
        if grade.len() != 1 || !grade.chars().all(|c| c.is_ascii_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "grade key '{grade}' must be a single lowercase letter"
            )));
        }
        if !score.is_finite() {
            return Err(ConfigError::Validation(format!(
                "grade '{grade}' has non-finite score"
            )));
        }
    }

    for (from, to) in &tables.category_aliases {
        for tag in [from, to] {
            if tag.is_empty() || tag.chars().any(|c| c.is_whitespace() || c == '_') {
                return Err(ConfigError::Validation(format!(
                    "category alias '{from}' -> '{to}': '{tag}' is not a normalized tag"
                )));
            }
        }
    }

    if !tables.fallback_score.is_finite() {
        return Err(ConfigError::Validation(
            "fallback_score must be finite".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_grade_scores_match_known_table() {
        let tables = RankTables::default();
        assert_eq!(tables.grade_score("a"), Some(80.0));
        assert_eq!(tables.grade_score("b"), Some(65.0));
        assert_eq!(tables.grade_score("c"), Some(50.0));
        assert_eq!(tables.grade_score("d"), Some(35.0));
        assert_eq!(tables.grade_score("e"), Some(20.0));
    }

    #[test]
    fn grade_score_is_case_insensitive() {
        let tables = RankTables::default();
        assert_eq!(tables.grade_score("A"), Some(80.0));
    }

    #[test]
    fn grade_score_unknown_grade_is_none() {
        let tables = RankTables::default();
        assert_eq!(tables.grade_score("f"), None);
    }

    #[test]
    fn default_aliases_correct_ice_cream_taxonomy() {
        let tables = RankTables::default();
        assert_eq!(tables.alias("ice-cream-tubs"), Some("ice-creams"));
        assert_eq!(tables.alias("ice-creams-and-sorbets"), Some("ice-creams"));
        assert_eq!(tables.alias("frozen-foods"), Some("frozen-products"));
        assert_eq!(tables.alias("plant-based-foods"), None);
    }

    #[test]
    fn yaml_overrides_parse_and_validate() {
        let yaml = r"
category_aliases:
  sorbet-tubs: ice-creams
grade_scores:
  a: 90.0
  b: 70.0
fallback_score: 40.0
default_grade: b
";
        let tables: RankTables = serde_yaml::from_str(yaml).expect("yaml should parse");
        validate_tables(&tables).expect("tables should validate");
        assert_eq!(tables.alias("sorbet-tubs"), Some("ice-creams"));
        assert_eq!(tables.grade_score("a"), Some(90.0));
        assert_eq!(tables.fallback_score, 40.0);
        assert_eq!(tables.default_grade, "b");
    }

    #[test]
    fn validation_rejects_multi_letter_grade() {
        let yaml = "grade_scores:\n  ab: 10.0\n";
        let tables: RankTables = serde_yaml::from_str(yaml).expect("yaml should parse");
        let result = validate_tables(&tables);
        assert!(
            matches!(result, Err(ConfigError::Validation(ref msg)) if msg.contains("ab")),
            "expected validation error, got: {result:?}"
        );
    }

    #[test]
    fn validation_rejects_unnormalized_alias() {
        let yaml = "category_aliases:\n  \"Ice Cream\": ice-creams\n";
        let tables: RankTables = serde_yaml::from_str(yaml).expect("yaml should parse");
        assert!(validate_tables(&tables).is_err());
    }
}
