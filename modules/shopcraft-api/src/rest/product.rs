use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use tracing::warn;

use shopcraft_common::TraceId;

use crate::pipeline::{self, ProductResponse};
use crate::ServerDeps;

use super::error_response;

#[derive(Deserialize)]
pub struct ProductRequest {
    text: Option<String>,
    image_url: Option<String>,
    trace_id: Option<String>,
}

pub async fn api_process_product(
    State(deps): State<Arc<ServerDeps>>,
    Json(body): Json<ProductRequest>,
) -> impl IntoResponse {
    let trace_id = TraceId::from_caller(body.trace_id.as_deref());

    match pipeline::process_product(
        &deps,
        body.text.as_deref(),
        body.image_url.as_deref(),
        &trace_id,
    )
    .await
    {
        Ok(outcome) => Json(ProductResponse::from_result(trace_id, Ok(outcome))).into_response(),
        Err(e) => {
            warn!(trace_id = %trace_id, error = %e, "Product processing failed");
            error_response("processing_status", &trace_id, &e, None)
        }
    }
}
