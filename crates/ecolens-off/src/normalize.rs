//! Normalization from raw upstream records to [`ecolens_core::NormalizedProduct`].
//!
//! Identity resolution lives in [`crate::extract`], the eco-score conversion
//! in [`crate::environmental`], and tag cleaning in [`crate::tags`]; this
//! module assembles the pieces.

use serde_json::Value;

use ecolens_core::NormalizedProduct;

use crate::environmental::transform_environmental;
use crate::extract::extract_identity;
use crate::tags::{normalize_categories, normalize_labels};
use crate::types::RawProduct;

/// Normalizes a single raw record.
///
/// Returns `None` when the record's id or name cannot be resolved; partially
/// filled products are never produced.
#[must_use]
pub fn normalize_product(raw: &RawProduct) -> Option<NormalizedProduct> {
    let Some(identity) = extract_identity(raw) else {
        tracing::warn!("skipping record with unresolvable id/name");
        return None;
    };

    let environmental_score = transform_environmental(raw);

    let categories = raw
        .get("categories_hierarchy")
        .and_then(Value::as_array)
        .map(|hierarchy| normalize_categories(hierarchy))
        .unwrap_or_default();

    let labels = raw
        .get("labels")
        .and_then(Value::as_str)
        .map(normalize_labels)
        .unwrap_or_default();

    tracing::debug!(
        id = %identity.id,
        name = %identity.name,
        categories = categories.len(),
        labels = labels.len(),
        "normalized product"
    );

    Some(NormalizedProduct {
        id: identity.id,
        name: identity.name,
        environmental_score,
        categories,
        labels,
    })
}
