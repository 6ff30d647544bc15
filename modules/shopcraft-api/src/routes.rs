use std::sync::Arc;

use axum::{
    http::{header, HeaderValue},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::rest;
use crate::ServerDeps;

pub fn build_router(deps: Arc<ServerDeps>) -> Router {
    let allowed_origins = deps.config.allowed_origins.clone();

    let cors = if allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let api = Router::new()
        .route("/", get(rest::api_root))
        .route("/health", get(rest::api_health))
        .route("/api/v1/process-text", post(rest::seller::api_process_text))
        .route("/api/v1/process-image", post(rest::seller::api_process_image))
        .route("/api/v1/process-product", post(rest::product::api_process_product))
        .route("/api/v1/generate-image", post(rest::generate::api_generate_image))
        .route("/api/v1/generate-video", post(rest::generate::api_generate_video))
        .with_state(deps.clone())
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ));

    Router::new()
        .merge(api)
        .nest_service("/downloads/images", ServeDir::new(deps.media.images_dir()))
        .nest_service("/downloads/videos", ServeDir::new(deps.media.videos_dir()))
        .layer(cors)
        // Method and path only; no query strings or client addresses.
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        )
}
