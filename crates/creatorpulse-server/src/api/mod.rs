mod creators;
mod generate;
mod insight;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use creatorpulse_generate::{GenerateError, Orchestrator};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::middleware::{request_id, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    /// Whether the caller could plausibly succeed by retrying later.
    pub retryable: bool,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    creators_loaded: usize,
    generator: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
                retryable: false,
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            "insufficient_data" => StatusCode::UNPROCESSABLE_ENTITY,
            "not_configured" | "upstream_rate_limited" => StatusCode::SERVICE_UNAVAILABLE,
            "upstream_timeout" => StatusCode::GATEWAY_TIMEOUT,
            "upstream_error" | "upstream_malformed" => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

pub(super) fn map_generate_error(request_id: String, error: &GenerateError) -> ApiError {
    if error.is_retryable() {
        tracing::warn!(code = error.code(), error = %error, "generation failed upstream");
    } else {
        tracing::info!(code = error.code(), error = %error, "generation request rejected");
    }
    let mut api_error = ApiError::new(request_id, error.code(), error.to_string());
    api_error.error.retryable = error.is_retryable();
    api_error
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/creators", get(creators::list_creators))
        .route(
            "/api/v1/categories/{category}/insight",
            get(insight::category_insight),
        )
        .route("/api/v1/generate/style", post(generate::generate_style))
        .route("/api/v1/generate/trend", post(generate::generate_trend))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let meta = ResponseMeta::new(req_id.0);
    let generator = if state.orchestrator.is_generator_configured() {
        "configured"
    } else {
        "unconfigured"
    };
    (
        StatusCode::OK,
        Json(ApiResponse {
            data: HealthData {
                status: "ok",
                creators_loaded: state.orchestrator.creator_count(),
                generator,
            },
            meta,
        }),
    )
}
