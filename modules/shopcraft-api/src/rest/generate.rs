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
pub struct GenerateImageRequest {
    #[serde(default)]
    description: String,
    width: Option<u32>,
    height: Option<u32>,
    trace_id: Option<String>,
}

#[derive(Deserialize)]
pub struct GenerateVideoRequest {
    #[serde(default)]
    description: String,
    duration_seconds: Option<u32>,
    aspect_ratio: Option<String>,
    trace_id: Option<String>,
}

pub async fn api_generate_image(
    State(deps): State<Arc<ServerDeps>>,
    Json(body): Json<GenerateImageRequest>,
) -> impl IntoResponse {
    let trace_id = TraceId::from_caller(body.trace_id.as_deref());

    match pipeline::generate_image(&deps, &body.description, body.width, body.height, trace_id.clone())
        .await
    {
        Ok(generated) => Json(generated).into_response(),
        Err(e) => {
            warn!(trace_id = %trace_id, error = %e, "Image generation failed");
            error_response("generation_status", &trace_id, &e, None)
        }
    }
}

pub async fn api_generate_video(
    State(deps): State<Arc<ServerDeps>>,
    Json(body): Json<GenerateVideoRequest>,
) -> impl IntoResponse {
    let trace_id = TraceId::from_caller(body.trace_id.as_deref());

    match pipeline::generate_video(
        &deps,
        &body.description,
        body.duration_seconds,
        body.aspect_ratio.as_deref(),
        trace_id.clone(),
    )
    .await
    {
        Ok(generated) => Json(generated).into_response(),
        Err(e) => {
            warn!(trace_id = %trace_id, error = %e, "Video generation failed");
            error_response("generation_status", &trace_id, &e, None)
        }
    }
}
