use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A food product normalized from an Open Food Facts record for storage and
/// comparison across upstream payload variations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedProduct {
    /// Upstream identifier: the `code` barcode when present, otherwise `_id`.
    pub id: String,
    pub name: String,
    pub environmental_score: EnvironmentalScore,
    /// English category names from the upstream hierarchy, order preserved.
    pub categories: Vec<String>,
    /// Title-cased label names split from the upstream comma-delimited string.
    pub labels: Vec<String>,
}

impl NormalizedProduct {
    /// Returns `true` if the record carries any packaging-material breakdown.
    #[must_use]
    pub fn has_material_scores(&self) -> bool {
        !self.environmental_score.material_scores.is_empty()
    }

    /// Returns `true` if lifecycle CO₂ data survived normalization.
    #[must_use]
    pub fn has_lifecycle_co2(&self) -> bool {
        self.environmental_score.lifecycle_co2.is_some()
    }
}

/// The internal environmental-score schema derived from the upstream
/// `ecoscore_data` substructure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnvironmentalScore {
    pub adjusted_score: f64,
    /// Single-letter grade (`"a"`–`"e"`), or empty when the upstream record
    /// carries none.
    pub overall_grade: String,
    pub packaging_score: f64,
    /// Keyed by the normalized material name: language prefix stripped,
    /// hyphens replaced with underscores, upper-cased (e.g. `"PET_BOTTLE"`).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub material_scores: BTreeMap<String, MaterialScore>,
    /// Present only when upstream CO₂ data exists and is not suppressed by a
    /// data-quality warning (see the transformer for the exact rule).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifecycle_co2: Option<LifecycleCo2>,
}

/// Per-material packaging detail contributing to the eco-score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialScore {
    /// Raw upstream material tag, e.g. `"en:pet-bottle"`.
    pub material: String,
    /// Same value as `material`; the upstream schema duplicates it.
    pub packaging_id: String,
    pub material_score: f64,
    pub shape_ratio: f64,
    /// Raw upstream shape tag, e.g. `"en:bottle"`; empty when absent.
    pub shape: String,
    /// Shape tag with its language prefix stripped.
    pub shape_id: String,
}

/// Lifecycle-assessment CO₂ sub-totals (kg CO₂e per kg of product), keyed by
/// contribution phase in the upstream Agribalyse dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LifecycleCo2 {
    pub total: f64,
    pub agriculture: f64,
    pub consumption: f64,
    pub distribution: f64,
    pub packaging: f64,
    pub processing: f64,
    pub transportation: f64,
}

/// A product candidate on the category-recommendation path, reduced to the
/// fields needed for cross-category ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub id: String,
    pub name: String,
    /// Eco-score, or a grade-derived default when the upstream value is
    /// missing or malformed.
    pub score: f64,
    /// Eco-score grade; defaults to `"c"` when the upstream record has none.
    pub grade: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_product(
        materials: BTreeMap<String, MaterialScore>,
        co2: Option<LifecycleCo2>,
    ) -> NormalizedProduct {
        NormalizedProduct {
            id: "3017620422003".to_string(),
            name: "Nutella".to_string(),
            environmental_score: EnvironmentalScore {
                adjusted_score: 42.0,
                overall_grade: "d".to_string(),
                packaging_score: -10.0,
                material_scores: materials,
                lifecycle_co2: co2,
            },
            categories: vec!["Spreads".to_string()],
            labels: vec!["Gluten Free".to_string()],
        }
    }

    fn make_material() -> MaterialScore {
        MaterialScore {
            material: "en:pet-bottle".to_string(),
            packaging_id: "en:pet-bottle".to_string(),
            material_score: 71.0,
            shape_ratio: 1.0,
            shape: "en:bottle".to_string(),
            shape_id: "bottle".to_string(),
        }
    }

    #[test]
    fn has_material_scores_false_when_empty() {
        let product = make_product(BTreeMap::new(), None);
        assert!(!product.has_material_scores());
    }

    #[test]
    fn has_material_scores_true_when_present() {
        let mut materials = BTreeMap::new();
        materials.insert("PET_BOTTLE".to_string(), make_material());
        let product = make_product(materials, None);
        assert!(product.has_material_scores());
    }

    #[test]
    fn has_lifecycle_co2_reflects_option() {
        assert!(!make_product(BTreeMap::new(), None).has_lifecycle_co2());
        let co2 = LifecycleCo2 {
            total: 12.5,
            ..LifecycleCo2::default()
        };
        assert!(make_product(BTreeMap::new(), Some(co2)).has_lifecycle_co2());
    }

    #[test]
    fn environmental_score_defaults_are_zeroed() {
        let score = EnvironmentalScore::default();
        assert_eq!(score.adjusted_score, 0.0);
        assert_eq!(score.overall_grade, "");
        assert_eq!(score.packaging_score, 0.0);
        assert!(score.material_scores.is_empty());
        assert!(score.lifecycle_co2.is_none());
    }

    #[test]
    fn empty_material_scores_not_serialized() {
        let product = make_product(BTreeMap::new(), None);
        let json = serde_json::to_value(&product).expect("serialization failed");
        let env = &json["environmental_score"];
        assert!(env.get("material_scores").is_none());
        assert!(env.get("lifecycle_co2").is_none());
    }

    #[test]
    fn serde_roundtrip_product() {
        let mut materials = BTreeMap::new();
        materials.insert("PET_BOTTLE".to_string(), make_material());
        let co2 = LifecycleCo2 {
            total: 2.5,
            agriculture: 1.9,
            ..LifecycleCo2::default()
        };
        let product = make_product(materials, Some(co2));

        let json = serde_json::to_string(&product).expect("serialization failed");
        let decoded: NormalizedProduct =
            serde_json::from_str(&json).expect("deserialization failed");

        assert_eq!(decoded.id, product.id);
        assert_eq!(decoded.name, product.name);
        assert_eq!(
            decoded.environmental_score.material_scores["PET_BOTTLE"].material,
            "en:pet-bottle"
        );
        assert_eq!(
            decoded.environmental_score.lifecycle_co2.map(|c| c.total),
            Some(2.5)
        );
    }
}
