use axum::{extract::State, response::IntoResponse, Extension, Json};

use crate::middleware::RequestId;

use super::{ApiResponse, AppState, ResponseMeta};

/// GET /api/v1/creators — every stored creator with derived classification.
pub(super) async fn list_creators(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    Json(ApiResponse {
        data: state.orchestrator.creators(),
        meta: ResponseMeta::new(req_id.0),
    })
}
