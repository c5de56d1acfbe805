//! Cross-category aggregation and ranking.
//!
//! One fetch per requested category, issued concurrently; a failed category
//! contributes zero candidates instead of failing the request. The merged
//! pool is deduplicated by name (higher score wins) and ranked.

use std::collections::HashMap;

use ecolens_core::{RankTables, RankedCandidate};
use ecolens_off::OffClient;

use crate::candidate::map_candidate;
use crate::category::resolve_category_tag;

/// Fetches, merges, and ranks candidates across the requested categories.
///
/// Returns the top `top_n` candidates by score descending. An empty category
/// list, or categories that all fail or come back empty, yields an empty
/// vector — "no content" is not an error on this path.
pub async fn rank_top_categories(
    client: &OffClient,
    tables: &RankTables,
    categories: &[String],
    top_n: usize,
    page_size: u32,
) -> Vec<RankedCandidate> {
    if categories.is_empty() {
        return Vec::new();
    }

    let fetches = categories
        .iter()
        .map(|category| fetch_category(client, tables, category, page_size));
    let per_category = futures::future::join_all(fetches).await;

    let all: Vec<RankedCandidate> = per_category.into_iter().flatten().collect();
    if all.is_empty() {
        tracing::warn!("no candidates found for any requested category");
        return Vec::new();
    }

    let mut ranked = dedup_and_rank(all);
    ranked.truncate(top_n);
    ranked
}

/// Fetches one category's candidates, degrading failures to an empty list.
async fn fetch_category(
    client: &OffClient,
    tables: &RankTables,
    category: &str,
    page_size: u32,
) -> Vec<RankedCandidate> {
    let tag = resolve_category_tag(tables, category);

    let raws = match client.category_products(&tag, page_size).await {
        Ok(raws) => raws,
        Err(e) => {
            tracing::warn!(category, tag = %tag, error = %e, "category fetch failed, contributing no candidates");
            return Vec::new();
        }
    };

    let mut candidates = Vec::new();
    for raw in &raws {
        if let Some(candidate) = map_candidate(tables, raw, candidates.len()) {
            candidates.push(candidate);
        }
    }

    tracing::debug!(
        category,
        tag = %tag,
        fetched = raws.len(),
        kept = candidates.len(),
        "collected category candidates"
    );
    candidates
}

/// Deduplicates by exact name — keeping the higher-scoring entry — and sorts
/// by score descending.
///
/// The merge is order-preserving: on equal scores the earlier entry survives
/// dedup, and the stable sort keeps earlier entries ahead, so the result is
/// deterministic for any fixed input order.
#[must_use]
pub fn dedup_and_rank(candidates: Vec<RankedCandidate>) -> Vec<RankedCandidate> {
    let mut index_by_name: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<RankedCandidate> = Vec::new();

    for candidate in candidates {
        match index_by_name.get(&candidate.name) {
            Some(&i) if candidate.score > unique[i].score => unique[i] = candidate,
            Some(_) => {}
            None => {
                index_by_name.insert(candidate.name.clone(), unique.len());
                unique.push(candidate);
            }
        }
    }

    unique.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
    unique
}
