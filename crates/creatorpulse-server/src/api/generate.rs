use axum::{extract::State, Extension, Json};
use creatorpulse_generate::{GenerationResult, StyleRequest, TrendRequest};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{map_generate_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct StyleBody {
    creator_id: String,
    topic: String,
    tone: Option<String>,
    length: Option<String>,
    format: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TrendBody {
    category: String,
    topic: Option<String>,
    target_followers: Option<u64>,
    tone: Option<String>,
    length: Option<String>,
    format: Option<String>,
}

/// POST /api/v1/generate/style — content in one creator's measured voice.
pub(super) async fn generate_style(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<StyleBody>,
) -> Result<Json<ApiResponse<GenerationResult>>, ApiError> {
    let request = StyleRequest::new(
        &body.creator_id,
        &body.topic,
        body.tone.as_deref(),
        body.length.as_deref(),
        body.format.as_deref(),
    )
    .map_err(|err| map_generate_error(req_id.0.clone(), &err))?;

    let result = state
        .orchestrator
        .generate_style(&request)
        .await
        .map_err(|err| map_generate_error(req_id.0.clone(), &err))?;

    Ok(Json(ApiResponse {
        data: result,
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// POST /api/v1/generate/trend — data-grounded content for a category.
pub(super) async fn generate_trend(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<TrendBody>,
) -> Result<Json<ApiResponse<GenerationResult>>, ApiError> {
    let request = TrendRequest::new(
        &body.category,
        body.topic.as_deref(),
        body.target_followers,
        body.tone.as_deref(),
        body.length.as_deref(),
        body.format.as_deref(),
    )
    .map_err(|err| map_generate_error(req_id.0.clone(), &err))?;

    let result = state
        .orchestrator
        .generate_trend(&request)
        .await
        .map_err(|err| map_generate_error(req_id.0.clone(), &err))?;

    Ok(Json(ApiResponse {
        data: result,
        meta: ResponseMeta::new(req_id.0),
    }))
}
