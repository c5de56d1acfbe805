//! Open Food Facts API response types.
//!
//! The search endpoint wraps results in a `{"products": [...], ...}` envelope.
//! Individual product records are kept loosely typed: the upstream schema
//! varies per record — any field may be absent, null, or carry an unexpected
//! type — so records are parsed field-by-field through
//! [`crate::fields`] instead of a rigid struct.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Envelope for `search.pl` responses.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub products: Vec<RawProduct>,
    #[serde(default)]
    pub count: Option<i64>,
}

/// A single loosely-typed product record as returned by the upstream source.
///
/// No invariants hold here; every read goes through a fallback chain or
/// carries a documented default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawProduct(pub Map<String, Value>);

impl RawProduct {
    /// Direct single-key lookup; `None` for absent keys (nulls are preserved).
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Builds a record from key/value pairs; test and fixture convenience.
    #[must_use]
    pub fn from_pairs(pairs: impl IntoIterator<Item = (&'static str, Value)>) -> Self {
        Self(
            pairs
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }
}
