use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Deserialize;

use ecolens_rank::rank_top_categories;

use crate::middleware::RequestId;

use super::{ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct RecommendationsRequest {
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
    #[serde(default)]
    pub top_n: Option<usize>,
}

fn default_categories() -> Vec<String> {
    [
        "plant-based-foods-and-beverages",
        "plant-based-foods",
        "cereals-and-potatoes",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

/// Ranks products across the requested categories.
///
/// An empty ranking is not an error: the response is `204 No Content`.
pub(super) async fn get_recommendations(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(request): Json<RecommendationsRequest>,
) -> Response {
    let top_n = request.top_n.unwrap_or(state.default_top_n);

    let ranked = rank_top_categories(
        &state.client,
        &state.tables,
        &request.categories,
        top_n,
        state.category_page_size,
    )
    .await;

    if ranked.is_empty() {
        tracing::info!(
            categories = request.categories.len(),
            "no recommendations for requested categories"
        );
        return StatusCode::NO_CONTENT.into_response();
    }

    Json(ApiResponse {
        data: ranked,
        meta: ResponseMeta::new(req_id.0),
    })
    .into_response()
}
