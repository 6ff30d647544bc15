pub mod generate;
pub mod product;
pub mod seller;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::{json, Map, Value};

use shopcraft_common::{ShopcraftError, TraceId};

// --- Service endpoints ---

pub async fn api_root() -> impl IntoResponse {
    Json(json!({ "message": "Welcome to Shopcraft API" }))
}

pub async fn api_health() -> impl IntoResponse {
    Json(json!({ "status": "healthy", "message": "API is running" }))
}

// --- Helpers ---

pub fn status_for(err: &ShopcraftError) -> StatusCode {
    match err {
        ShopcraftError::Validation(_) => StatusCode::BAD_REQUEST,
        ShopcraftError::Config(_) => StatusCode::SERVICE_UNAVAILABLE,
        ShopcraftError::Upstream(_) => StatusCode::BAD_GATEWAY,
        ShopcraftError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        ShopcraftError::Storage(_) | ShopcraftError::Anyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// `{"trace_id", "<stage>_status": "error", "error", "warnings"?}` with the mapped status code.
pub fn error_response(
    status_key: &str,
    trace_id: &TraceId,
    err: &ShopcraftError,
    warnings: Option<&[String]>,
) -> Response {
    let mut body = Map::new();
    body.insert("trace_id".into(), json!(trace_id));
    if let Some(warnings) = warnings {
        body.insert("warnings".into(), json!(warnings));
    }
    body.insert(status_key.into(), json!("error"));
    body.insert("error".into(), json!(err.message()));

    (status_for(err), Json(Value::Object(body))).into_response()
}
