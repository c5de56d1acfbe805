//! In-memory product cache keyed by the normalized query string.
//!
//! This is the seam where a persistence layer would plug in; the core keeps
//! no state of its own, so the cache owns the only stored records in the
//! process.

use std::collections::HashMap;
use std::sync::Arc;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use tokio::sync::RwLock;

use ecolens_core::NormalizedProduct;

/// Derives the cache key for a free-text product query.
///
/// Percent-encoding doubles as normalization: the key is identical to the
/// encoded form the query takes on the upstream URL.
#[must_use]
pub fn cache_key(query: &str) -> String {
    utf8_percent_encode(query, NON_ALPHANUMERIC).to_string()
}

/// Shared in-memory cache of normalized lookup results.
#[derive(Debug, Clone, Default)]
pub struct ProductCache {
    inner: Arc<RwLock<HashMap<String, NormalizedProduct>>>,
}

impl ProductCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, key: &str) -> Option<NormalizedProduct> {
        self.inner.read().await.get(key).cloned()
    }

    pub async fn insert(&self, key: String, product: NormalizedProduct) {
        self.inner.write().await.insert(key, product);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecolens_core::EnvironmentalScore;

    fn product(id: &str) -> NormalizedProduct {
        NormalizedProduct {
            id: id.to_string(),
            name: "Oat Drink".to_string(),
            environmental_score: EnvironmentalScore::default(),
            categories: Vec::new(),
            labels: Vec::new(),
        }
    }

    #[test]
    fn cache_key_percent_encodes_like_the_upstream_url() {
        assert_eq!(cache_key("oat drink"), "oat%20drink");
        assert_eq!(cache_key("nutella"), "nutella");
    }

    #[tokio::test]
    async fn miss_then_hit() {
        let cache = ProductCache::new();
        let key = cache_key("oat drink");

        assert!(cache.get(&key).await.is_none());
        cache.insert(key.clone(), product("1")).await;
        assert_eq!(cache.get(&key).await.map(|p| p.id), Some("1".to_string()));
    }

    #[tokio::test]
    async fn insert_overwrites_existing_entry() {
        let cache = ProductCache::new();
        let key = cache_key("oat drink");

        cache.insert(key.clone(), product("1")).await;
        cache.insert(key.clone(), product("2")).await;
        assert_eq!(cache.get(&key).await.map(|p| p.id), Some("2".to_string()));
    }
}
