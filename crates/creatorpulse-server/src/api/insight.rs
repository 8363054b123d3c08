use std::str::FromStr;

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use creatorpulse_core::Category;
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct InsightQuery {
    target_followers: Option<u64>,
}

/// GET /api/v1/categories/{category}/insight — on-demand engagement
/// aggregation. A category with no qualifying data returns the flagged
/// empty insight, not an error.
pub(super) async fn category_insight(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(query): Query<InsightQuery>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<creatorpulse_analytics::EngagementInsight>>, ApiError> {
    let category = Category::from_str(&category)
        .map_err(|err| ApiError::new(req_id.0.clone(), "validation_error", err))?;
    if query.target_followers == Some(0) {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "target_followers must be positive",
        ));
    }

    let insight = state
        .orchestrator
        .category_insight(category, query.target_followers);
    Ok(Json(ApiResponse {
        data: insight,
        meta: ResponseMeta::new(req_id.0),
    }))
}
