use ai_client::{preview, strip_code_blocks, Part};
use serde::Serialize;
use tracing::{info, warn};

use shopcraft_common::{normalize_with_outcome, ProductStrategy, ShopcraftError, Status, TraceId};

use crate::deps::ServerDeps;
use crate::fetch::PRODUCT_IMAGE_TIMEOUT;
use crate::prompts::strategy_prompt;

use super::upstream;

pub const NO_CONTENT: &str = "No valid text or image content provided";
pub const IMAGE_ATTACHED_LINE: &str = "Product image: [Image provided for analysis]";

/// Whether the strategy came from the model's JSON or from the templated fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategySource {
    Model,
    Fallback,
}

#[derive(Debug, Clone)]
pub struct ProductOutcome {
    pub strategy: ProductStrategy,
    pub source: StrategySource,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductResponse {
    pub trace_id: TraceId,
    pub processing_status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategies: Option<ProductStrategy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy_source: Option<StrategySource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ProductResponse {
    pub fn from_result(trace_id: TraceId, result: Result<ProductOutcome, ShopcraftError>) -> Self {
        match result {
            Ok(outcome) => Self {
                trace_id,
                processing_status: Status::Success,
                strategies: Some(outcome.strategy),
                strategy_source: Some(outcome.source),
                error: None,
            },
            Err(e) => Self {
                trace_id,
                processing_status: Status::Error,
                strategies: None,
                strategy_source: None,
                error: Some(e.message()),
            },
        }
    }
}

/// Generate the six-field strategy from seller text, a product image, or both.
///
/// An image that cannot be downloaded is mentioned by URL instead of failing
/// the request. The fallback strategy is seeded with the raw text.
pub async fn process_product(
    deps: &ServerDeps,
    text: Option<&str>,
    image_url: Option<&str>,
    trace_id: &TraceId,
) -> Result<ProductOutcome, ShopcraftError> {
    let model = deps.strategist()?;

    let raw_text = text.unwrap_or_default();
    let image_url = image_url.map(str::trim).filter(|u| !u.is_empty());

    let mut lines = Vec::new();
    let mut image_part = None;

    if !raw_text.trim().is_empty() {
        lines.push(format!("Product text description: {}", raw_text.trim()));
    }

    if let Some(url) = image_url {
        match download_product_image(deps, url, trace_id).await {
            Some(part) => {
                lines.push(IMAGE_ATTACHED_LINE.to_string());
                image_part = Some(part);
            }
            None => lines.push(format!("Product image URL (unable to download): {url}")),
        }
    }

    if lines.is_empty() {
        return Err(ShopcraftError::Validation(NO_CONTENT.to_string()));
    }

    let mut parts = vec![Part::text(strategy_prompt(&lines))];
    parts.extend(image_part);

    info!(
        trace_id = %trace_id,
        model = model.model_name(),
        has_image = parts.len() > 1,
        "Generating product strategy"
    );

    let raw = model
        .generate(parts)
        .await
        .map_err(|e| upstream("Strategy generation failed", e))?;

    let normalized = normalize_with_outcome(strip_code_blocks(&raw), raw_text);
    let source = if normalized.is_fallback() {
        warn!(
            trace_id = %trace_id,
            response = %preview(&raw, 200),
            "Model response was not a JSON object; using fallback strategy"
        );
        StrategySource::Fallback
    } else {
        StrategySource::Model
    };

    Ok(ProductOutcome {
        strategy: normalized.into_strategy(),
        source,
    })
}

async fn download_product_image(deps: &ServerDeps, url: &str, trace_id: &TraceId) -> Option<Part> {
    match deps.images.fetch(url, PRODUCT_IMAGE_TIMEOUT).await {
        Ok(image) if image.declared_image() => {
            let mime_type = image.mime_type()?;
            Some(Part::image(mime_type, image.bytes))
        }
        Ok(image) => {
            warn!(
                trace_id = %trace_id,
                url,
                content_type = %image.content_type,
                "Product image URL did not return an image"
            );
            None
        }
        Err(e) => {
            warn!(trace_id = %trace_id, url, error = %e, "Product image download failed");
            None
        }
    }
}
