use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use shopcraft_api::{build_router, ServerDeps};
use shopcraft_common::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    let addr = config.bind_addr();
    info!(media_dir = %config.media_dir.display(), "Starting shopcraft-api");

    let deps = Arc::new(ServerDeps::from_config(config)?);
    let app = build_router(deps);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Shopcraft API listening on {addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
