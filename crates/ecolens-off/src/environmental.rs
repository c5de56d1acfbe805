//! Transformation of the upstream eco-score substructure into the internal
//! environmental-score schema.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use ecolens_core::{EnvironmentalScore, LifecycleCo2, MaterialScore};

use crate::fields::{as_f64_lenient, is_set, non_empty_str};
use crate::tags::strip_language_prefix;
use crate::types::RawProduct;

/// Converts a record's `ecoscore_data` into an [`EnvironmentalScore`].
///
/// An absent or empty substructure yields the zeroed defaults — never an
/// error; upstream records without environmental data are common.
#[must_use]
pub fn transform_environmental(raw: &RawProduct) -> EnvironmentalScore {
    let Some(eco) = raw
        .get("ecoscore_data")
        .and_then(Value::as_object)
        .filter(|o| !o.is_empty())
    else {
        tracing::debug!("record has no ecoscore data, using defaults");
        return EnvironmentalScore::default();
    };

    let packaging = eco
        .get("adjustments")
        .and_then(Value::as_object)
        .and_then(|adjustments| adjustments.get("packaging"))
        .and_then(Value::as_object);

    let material_scores = packaging
        .and_then(|p| p.get("packagings"))
        .and_then(Value::as_array)
        .map(|entries| material_scores(entries))
        .unwrap_or_default();

    let lifecycle_co2 = eco
        .get("agribalyse")
        .and_then(Value::as_object)
        .filter(|o| !o.is_empty())
        .and_then(lifecycle_co2);

    EnvironmentalScore {
        adjusted_score: eco.get("score").and_then(as_f64_lenient).unwrap_or(0.0),
        overall_grade: eco
            .get("grade")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string(),
        packaging_score: packaging
            .and_then(|p| p.get("score"))
            .and_then(as_f64_lenient)
            .unwrap_or(0.0),
        material_scores,
        lifecycle_co2,
    }
}

/// Builds the per-material breakdown from the packaging-adjustment list.
///
/// Entries without a material id are skipped. The map key is the material
/// tag with its language prefix stripped, hyphens replaced by underscores,
/// upper-cased.
fn material_scores(entries: &[Value]) -> BTreeMap<String, MaterialScore> {
    let mut scores = BTreeMap::new();

    for entry in entries {
        let Some(entry) = entry.as_object() else {
            continue;
        };
        let Some(material) = entry.get("material").and_then(non_empty_str) else {
            continue;
        };

        let shape = entry
            .get("shape")
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string();
        let shape_id = strip_language_prefix(&shape).to_string();

        let read = |key: &str| entry.get(key).and_then(as_f64_lenient).unwrap_or(0.0);

        scores.insert(
            material_key(material),
            MaterialScore {
                material: material.to_string(),
                packaging_id: material.to_string(),
                material_score: read("environmental_score_material_score"),
                shape_ratio: read("environmental_score_shape_ratio"),
                shape,
                shape_id,
            },
        );
    }

    scores
}

fn material_key(material: &str) -> String {
    strip_language_prefix(material).replace('-', "_").to_uppercase()
}

/// Reads the Agribalyse CO₂ block, applying the inclusion rule.
///
/// The block is kept when the total is present and non-zero, OR when no
/// data-quality warning is set. The remaining case — a zero/absent total
/// under an active warning — suppresses the whole block. Upstream pairs the
/// warning flag with placeholder zero totals, so the asymmetry is load-bearing.
fn lifecycle_co2(agribalyse: &Map<String, Value>) -> Option<LifecycleCo2> {
    let total = agribalyse.get("co2_total").and_then(as_f64_lenient);
    let has_co2_data = total.is_some_and(|t| t != 0.0);
    let warned = agribalyse.get("warning").is_some_and(is_set);

    if !has_co2_data && warned {
        tracing::debug!("suppressing CO2 block: zero total under data-quality warning");
        return None;
    }

    let read = |key: &str| agribalyse.get(key).and_then(as_f64_lenient).unwrap_or(0.0);

    Some(LifecycleCo2 {
        total: read("co2_total"),
        agriculture: read("co2_agriculture"),
        consumption: read("co2_consumption"),
        distribution: read("co2_distribution"),
        packaging: read("co2_packaging"),
        processing: read("co2_processing"),
        transportation: read("co2_transportation"),
    })
}
