//! Score coercion with grade-derived defaults.

use serde_json::Value;

use ecolens_core::RankTables;
use ecolens_off::fields::as_f64_lenient;

/// A candidate score together with its provenance.
///
/// `defaulted` is `true` when the upstream value was missing or malformed
/// and a grade-derived (or absolute) default was substituted — observable
/// for logging and tests instead of silently coerced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoercedScore {
    pub value: f64,
    pub defaulted: bool,
}

/// Coerces an upstream score value, falling back through the grade table.
///
/// Numbers and numeric strings are taken directly. Anything else — absent,
/// null, or an unparseable string — resolves to the grade's default score,
/// or to the absolute fallback when the record carries no known grade.
#[must_use]
pub fn coerce_score(
    tables: &RankTables,
    raw_score: Option<&Value>,
    grade: Option<&str>,
) -> CoercedScore {
    if let Some(value) = raw_score.and_then(as_f64_lenient) {
        return CoercedScore {
            value,
            defaulted: false,
        };
    }

    let value = grade
        .and_then(|g| tables.grade_score(g))
        .unwrap_or(tables.fallback_score);

    CoercedScore {
        value,
        defaulted: true,
    }
}
