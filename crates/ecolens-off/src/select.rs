//! Quality scoring and best-candidate selection over raw search results.
//!
//! A search for one product name returns many near-duplicate records of
//! wildly varying completeness. Each candidate gets an additive quality
//! score; the best survivor wins.

use serde_json::Value;

use crate::extract::{resolve_identifier, NAME_FIELDS};
use crate::fields::FieldChain;
use crate::types::RawProduct;

const ECOSCORE: FieldChain = FieldChain::new("ecoscore", &["ecoscore_data.score"]);

/// Computes the additive quality score for one candidate, floored at 0.
///
/// Terms:
/// - eco-score × 0.6 when a non-zero score is present,
/// - +10 for a resolvable name,
/// - +2 per category level, capped at +10,
/// - +5 when a lifecycle CO₂ total is present (zero counts as present),
/// - +5 when at least one packaging entry exists,
/// - −20 when both identifier fields are missing.
#[must_use]
pub fn quality_score(raw: &RawProduct) -> f64 {
    let mut score = 0.0;

    if let Some(ecoscore) = ECOSCORE.resolve_f64(raw).filter(|v| *v != 0.0) {
        score += ecoscore * 0.6;
    }

    if NAME_FIELDS.resolve_str(raw).is_some() {
        score += 10.0;
    }

    let category_depth = raw
        .get("categories_hierarchy")
        .and_then(Value::as_array)
        .map_or(0, Vec::len);
    #[allow(clippy::cast_precision_loss)]
    {
        score += (category_depth as f64 * 2.0).min(10.0);
    }

    let co2_total_present = raw
        .get("ecoscore_data")
        .and_then(|eco| eco.get("agribalyse"))
        .and_then(|agribalyse| agribalyse.get("co2_total"))
        .is_some_and(|total| !total.is_null());
    if co2_total_present {
        score += 5.0;
    }

    let has_packagings = raw
        .get("ecoscore_data")
        .and_then(|eco| eco.get("adjustments"))
        .and_then(|adjustments| adjustments.get("packaging"))
        .and_then(|packaging| packaging.get("packagings"))
        .and_then(Value::as_array)
        .is_some_and(|list| !list.is_empty());
    if has_packagings {
        score += 5.0;
    }

    if resolve_identifier(raw).is_none() {
        score -= 20.0;
    }

    score.max(0.0)
}

/// Selects the best candidate among raw search results.
///
/// Candidates without an eco-score substructure are skipped before scoring;
/// scored candidates must clear `> 0`. Ties keep the earliest candidate
/// (stable max). Returns `None` when nothing survives — the payload had no
/// products, or none carried eco-score data.
#[must_use]
pub fn select_best_candidate(raws: &[RawProduct]) -> Option<&RawProduct> {
    let mut best: Option<(&RawProduct, f64)> = None;

    for raw in raws {
        let has_ecoscore = raw
            .get("ecoscore_data")
            .is_some_and(crate::fields::is_set);
        if !has_ecoscore {
            tracing::debug!("skipping candidate without ecoscore data");
            continue;
        }

        let score = quality_score(raw);
        if score <= 0.0 {
            continue;
        }

        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((raw, score)),
        }
    }

    match best {
        Some((raw, score)) => {
            tracing::info!(score, "selected best candidate");
            Some(raw)
        }
        None => {
            tracing::warn!("no candidate survived quality filtering");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> RawProduct {
        serde_json::from_value(value).expect("fixture should be an object")
    }

    fn with_score(name: &str, ecoscore: f64) -> RawProduct {
        record(json!({
            "code": "1",
            "product_name": name,
            "ecoscore_data": {"score": ecoscore}
        }))
    }

    #[test]
    fn ecoscore_term_weighted_at_sixty_percent() {
        let raw = with_score("A", 50.0);
        // 50 * 0.6 + 10 (name)
        assert_eq!(quality_score(&raw), 40.0);
    }

    #[test]
    fn zero_ecoscore_adds_nothing() {
        let raw = with_score("A", 0.0);
        assert_eq!(quality_score(&raw), 10.0);
    }

    #[test]
    fn category_depth_capped_at_ten() {
        let raw = record(json!({
            "code": "1",
            "product_name": "A",
            "categories_hierarchy": ["a", "b", "c", "d", "e", "f", "g"]
        }));
        // 10 (name) + min(14, 10)
        assert_eq!(quality_score(&raw), 20.0);
    }

    #[test]
    fn co2_total_bonus_counts_zero_as_present() {
        let raw = record(json!({
            "code": "1",
            "product_name": "A",
            "ecoscore_data": {"agribalyse": {"co2_total": 0}}
        }));
        // 10 (name) + 5 (co2 present; zero still counts)
        assert_eq!(quality_score(&raw), 15.0);
    }

    #[test]
    fn null_co2_total_earns_no_bonus() {
        let raw = record(json!({
            "code": "1",
            "product_name": "A",
            "ecoscore_data": {"agribalyse": {"co2_total": null}}
        }));
        assert_eq!(quality_score(&raw), 10.0);
    }

    #[test]
    fn packaging_bonus_requires_nonempty_list() {
        let with_packaging = record(json!({
            "code": "1",
            "product_name": "A",
            "ecoscore_data": {"adjustments": {"packaging": {"packagings": [{"material": "en:glass"}]}}}
        }));
        let empty_packaging = record(json!({
            "code": "1",
            "product_name": "A",
            "ecoscore_data": {"adjustments": {"packaging": {"packagings": []}}}
        }));
        assert_eq!(quality_score(&with_packaging), 15.0);
        assert_eq!(quality_score(&empty_packaging), 10.0);
    }

    #[test]
    fn missing_identifiers_penalized_and_floored() {
        let raw = record(json!({"product_name": "A", "ecoscore_data": {"score": 1}}));
        // 0.6 + 10 - 20 => floored to 0
        assert_eq!(quality_score(&raw), 0.0);
    }

    #[test]
    fn select_skips_candidates_without_ecoscore_data() {
        let raws = vec![
            record(json!({"code": "1", "product_name": "No Eco"})),
            with_score("Has Eco", 30.0),
        ];
        let best = select_best_candidate(&raws).expect("one candidate survives");
        assert_eq!(
            best.get("product_name").and_then(Value::as_str),
            Some("Has Eco")
        );
    }

    #[test]
    fn select_picks_maximum_score() {
        let raws = vec![
            with_score("Low", 10.0),
            with_score("High", 90.0),
            with_score("Mid", 50.0),
        ];
        let best = select_best_candidate(&raws).expect("candidates survive");
        assert_eq!(best.get("product_name").and_then(Value::as_str), Some("High"));
    }

    #[test]
    fn select_breaks_ties_by_input_order() {
        let raws = vec![with_score("First", 40.0), with_score("Second", 40.0)];
        let best = select_best_candidate(&raws).expect("candidates survive");
        assert_eq!(
            best.get("product_name").and_then(Value::as_str),
            Some("First")
        );
    }

    #[test]
    fn select_rejects_scores_floored_to_zero() {
        // No identifiers: 0.6*1 + 10 - 20 floors to 0, which fails `> 0`.
        let raws = vec![record(json!({
            "product_name": "Anonymous",
            "ecoscore_data": {"score": 1}
        }))];
        assert!(select_best_candidate(&raws).is_none());
    }

    #[test]
    fn select_empty_input_yields_none() {
        assert!(select_best_candidate(&[]).is_none());
    }
}
