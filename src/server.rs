use crate::error::PipelineError;
use crate::models::ResponseEnvelope;
use crate::orchestrator::{AnalyzeRequest, Orchestrator};
use crate::security::is_authorized;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Session used when the caller does not supply one
const DEFAULT_SESSION_ID: &str = "default";

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
}

/// Query-string form: `/analyze?query=..&lang=..&sessionId=..`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeParams {
    pub query: String,
    pub lang: String,
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub payload: ResponseEnvelope,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub enum ApiError {
    Unauthorized,
    BadRequest(String),
    Pipeline(PipelineError),
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        ApiError::Pipeline(err)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            // Detail is only in the orchestrator's failure log
            ApiError::Pipeline(err) if err.is_upstream() => (
                StatusCode::BAD_GATEWAY,
                "upstream service failed".to_string(),
            ),
            ApiError::Pipeline(err) => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/analyze", get(analyze_query).post(analyze_json))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

async fn analyze_query(
    State(state): State<AppState>,
    headers: HeaderMap,
    params: Result<Query<AnalyzeParams>, QueryRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let Query(params) = params?;
    let request = AnalyzeRequest {
        query: params.query,
        source_language_code: params.lang,
        session_id: params
            .session_id
            .unwrap_or_else(|| DEFAULT_SESSION_ID.to_string()),
    };
    handle(&state, &headers, request).await
}

async fn analyze_json(
    State(state): State<AppState>,
    headers: HeaderMap,
    request: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let Json(request) = request?;
    handle(&state, &headers, request).await
}

async fn handle(
    state: &AppState,
    headers: &HeaderMap,
    request: AnalyzeRequest,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let presented = headers.get("X-API-Key").and_then(|v| v.to_str().ok());
    if !is_authorized(state.orchestrator.config().api_key.as_deref(), presented) {
        warn!("Rejected /analyze request with missing or invalid API key");
        return Err(ApiError::Unauthorized);
    }

    if request.query.trim().is_empty() {
        return Err(ApiError::BadRequest("query must not be empty".to_string()));
    }
    if request.source_language_code.trim().is_empty() {
        return Err(ApiError::BadRequest("language code must not be empty".to_string()));
    }

    let payload = state.orchestrator.analyze(&request).await?;
    Ok(Json(AnalyzeResponse { payload }))
}
