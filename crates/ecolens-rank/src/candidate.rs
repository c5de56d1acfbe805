//! Mapping of raw category records into [`RankedCandidate`]s.

use ecolens_core::{RankTables, RankedCandidate};
use ecolens_off::fields::FieldChain;
use ecolens_off::types::RawProduct;

use crate::grade::coerce_score;

/// Category responses are trimmed by the `fields` parameter, so the name
/// chain is wider here than on the lookup path: generic names are better
/// than dropping the candidate.
const CANDIDATE_NAME: FieldChain = FieldChain::new(
    "name",
    &[
        "product_name",
        "product_name_en",
        "generic_name",
        "generic_name_en",
    ],
);

const CANDIDATE_SCORE: FieldChain =
    FieldChain::new("ecoscore", &["ecoscore_score", "ecoscore_data.score"]);

const CANDIDATE_GRADE: FieldChain =
    FieldChain::new("grade", &["ecoscore_grade", "ecoscore_data.grade"]);

const CANDIDATE_ID: FieldChain = FieldChain::new("id", &["_id", "code"]);

/// Maps one raw record to a ranking candidate.
///
/// Returns `None` when no name resolves — a nameless candidate cannot be
/// deduplicated or displayed. `fallback_index` seeds the synthesized id for
/// records that arrive without one.
#[must_use]
pub fn map_candidate(
    tables: &RankTables,
    raw: &RawProduct,
    fallback_index: usize,
) -> Option<RankedCandidate> {
    let name = CANDIDATE_NAME.resolve_str(raw)?.to_string();

    let grade = CANDIDATE_GRADE.resolve_str(raw);
    let score = coerce_score(tables, CANDIDATE_SCORE.resolve(raw), grade);
    if score.defaulted {
        tracing::debug!(%name, grade = ?grade, value = score.value, "substituted default score");
    }

    let id = CANDIDATE_ID
        .resolve_str(raw)
        .map_or_else(|| format!("rec_{fallback_index}"), str::to_string);

    Some(RankedCandidate {
        id,
        name,
        score: score.value,
        grade: grade.unwrap_or(&tables.default_grade).to_lowercase(),
    })
}
