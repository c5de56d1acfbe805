pub mod client;
pub mod environmental;
pub mod error;
pub mod extract;
pub mod fields;
pub mod normalize;
pub mod select;
pub mod tags;
pub mod types;

mod retry;

pub use client::OffClient;
pub use error::OffError;
pub use extract::{extract_identity, ProductIdentity};
pub use normalize::normalize_product;
pub use select::{quality_score, select_best_candidate};
pub use types::{RawProduct, SearchResponse};
