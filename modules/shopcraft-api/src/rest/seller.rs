use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use tracing::warn;

use shopcraft_common::TraceId;

use crate::pipeline;
use crate::ServerDeps;

use super::error_response;

#[derive(Deserialize)]
pub struct TextRequest {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
pub struct ImageRequest {
    #[serde(default)]
    image_url: String,
}

pub async fn api_process_text(
    State(deps): State<Arc<ServerDeps>>,
    Json(body): Json<TextRequest>,
) -> impl IntoResponse {
    let response = pipeline::process_text(&deps, &body.text, TraceId::new()).await;
    Json(response).into_response()
}

pub async fn api_process_image(
    State(deps): State<Arc<ServerDeps>>,
    Json(body): Json<ImageRequest>,
) -> impl IntoResponse {
    let trace_id = TraceId::new();
    let mut warnings = Vec::new();

    match pipeline::process_image(&deps, &body.image_url, trace_id.clone(), &mut warnings).await {
        Ok(response) => Json(response).into_response(),
        Err(e) => {
            warn!(trace_id = %trace_id, error = %e, "Seller image processing failed");
            error_response("processing_status", &trace_id, &e, Some(&warnings))
        }
    }
}
