//! Identity extraction from raw upstream records.

use crate::fields::FieldChain;
use crate::types::RawProduct;

/// Identifier fallback chain: the `code` barcode, then the raw `_id`.
pub const ID_FIELDS: FieldChain = FieldChain::new("id", &["code", "_id"]);

/// Display-name fallback chain.
pub const NAME_FIELDS: FieldChain = FieldChain::new("name", &["product_name", "product_name_en"]);

/// The two fields every normalized record must carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductIdentity {
    pub id: String,
    pub name: String,
}

/// Resolves id and name through their fallback chains.
///
/// Returns `None` when either cannot be resolved — a normal outcome for
/// malformed upstream entries, not a failure. Identifiers that arrive as
/// bare numbers are accepted and stringified.
#[must_use]
pub fn extract_identity(raw: &RawProduct) -> Option<ProductIdentity> {
    let id = resolve_identifier(raw);
    let name = NAME_FIELDS.resolve_str(raw).map(str::to_owned);

    match (id, name) {
        (Some(id), Some(name)) => Some(ProductIdentity { id, name }),
        (id, name) => {
            tracing::debug!(
                id_present = id.is_some(),
                name_present = name.is_some(),
                "record missing essential identity fields"
            );
            None
        }
    }
}

/// Resolves the identifier chain, stringifying numeric barcodes. An empty
/// `code` does not stop the chain; `_id` is still consulted.
pub(crate) fn resolve_identifier(raw: &RawProduct) -> Option<String> {
    ID_FIELDS.resolve_by(raw, |value| match value {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}
