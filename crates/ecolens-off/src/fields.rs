//! Fallback-chain field access over loosely-typed upstream records.
//!
//! Upstream records spell the same logical field several ways (`code` vs
//! `_id`, `ecoscore_score` vs `ecoscore_data.score`). Each logical field is
//! declared as a [`FieldChain`]: an explicit, ordered list of keys tried in
//! sequence. Keys may be dotted paths into nested objects.

use serde_json::Value;

use crate::types::RawProduct;

/// An ordered list of alternative keys for one logical field.
#[derive(Debug, Clone, Copy)]
pub struct FieldChain {
    /// Logical field name, used in trace output.
    pub name: &'static str,
    keys: &'static [&'static str],
}

impl FieldChain {
    #[must_use]
    pub const fn new(name: &'static str, keys: &'static [&'static str]) -> Self {
        Self { name, keys }
    }

    /// Returns the first present, non-null value along the chain.
    #[must_use]
    pub fn resolve<'a>(&self, record: &'a RawProduct) -> Option<&'a Value> {
        self.keys
            .iter()
            .find_map(|key| lookup_path(record, key))
            .filter(|v| !v.is_null())
    }

    /// Returns the first value along the chain accepted by `accept`.
    ///
    /// Values rejected by `accept` (e.g. empty strings) do not stop the
    /// chain; later keys are still consulted.
    pub fn resolve_by<'a, T>(
        &self,
        record: &'a RawProduct,
        accept: impl Fn(&'a Value) -> Option<T>,
    ) -> Option<T> {
        self.keys
            .iter()
            .filter_map(|key| lookup_path(record, key))
            .find_map(accept)
    }

    /// Returns the first non-empty string along the chain.
    #[must_use]
    pub fn resolve_str<'a>(&self, record: &'a RawProduct) -> Option<&'a str> {
        self.resolve_by(record, non_empty_str)
    }

    /// Returns the first value along the chain coercible to `f64`.
    ///
    /// Numeric strings count: the upstream source sometimes serializes scores
    /// as `"82"`. Unparseable strings are skipped, not errors.
    #[must_use]
    pub fn resolve_f64(&self, record: &RawProduct) -> Option<f64> {
        self.resolve_by(record, as_f64_lenient)
    }
}

/// Resolves a dotted path (e.g. `"ecoscore_data.score"`) into nested objects.
fn lookup_path<'a>(record: &'a RawProduct, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = record.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Coerces a JSON value to `f64`: numbers directly, strings via parsing.
#[must_use]
pub fn as_f64_lenient(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Returns the string content of a value, treating empty strings as absent.
#[must_use]
pub fn non_empty_str(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}

/// Upstream presence check with the source's loose conventions: flags are
/// set to a non-empty string or `1`, and cleared by omission, `null`, `""`,
/// `0`, or `false`. Empty arrays and objects also count as unset.
#[must_use]
pub fn is_set(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
