use axum::{extract::State, Extension, Json};
use serde::Deserialize;

use ecolens_core::NormalizedProduct;
use ecolens_off::{normalize_product, select_best_candidate};

use crate::cache::cache_key;
use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct ProductRequest {
    pub product_name: String,
}

/// Looks up a product by name: cache first, then upstream search followed by
/// best-candidate selection and normalization.
pub(super) async fn product_info(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<ProductRequest>,
) -> Result<Json<ApiResponse<NormalizedProduct>>, ApiError> {
    let query = request.product_name.trim();
    if query.is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "bad_request",
            "product_name must be non-empty",
        ));
    }

    let key = cache_key(query);
    if let Some(product) = state.cache.get(&key).await {
        tracing::debug!(%query, "product cache hit");
        return Ok(Json(ApiResponse {
            data: product,
            meta: ResponseMeta::new(req_id.0),
        }));
    }

    let raws = state.client.search_products(query).await.map_err(|e| {
        tracing::error!(%query, error = %e, "upstream product search failed");
        ApiError::new(
            req_id.0.clone(),
            "upstream_unavailable",
            "product search failed",
        )
    })?;

    let product = select_best_candidate(&raws)
        .and_then(normalize_product)
        .ok_or_else(|| {
            ApiError::new(
                req_id.0.clone(),
                "not_found",
                format!("no usable product found for \"{query}\""),
            )
        })?;

    state.cache.insert(key, product.clone()).await;

    Ok(Json(ApiResponse {
        data: product,
        meta: ResponseMeta::new(req_id.0),
    }))
}
