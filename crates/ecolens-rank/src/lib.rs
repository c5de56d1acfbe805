pub mod aggregate;
pub mod candidate;
pub mod category;
pub mod grade;

pub use aggregate::{dedup_and_rank, rank_top_categories};
pub use candidate::map_candidate;
pub use category::{normalize_category_tag, resolve_category_tag};
pub use grade::{coerce_score, CoercedScore};
