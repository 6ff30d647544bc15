use ai_client::Part;
use serde::Serialize;
use tracing::{info, warn};

use shopcraft_common::{enhance, ShopcraftError, Status, TraceId};

use crate::deps::ServerDeps;
use crate::fetch::{is_valid_url, FetchError, SELLER_IMAGE_TIMEOUT};
use crate::prompts::VISION_PROMPT;

use super::product::{process_product, ProductResponse};

pub const VISION_FALLBACK_BRIEF: &str = "Product image analysis unavailable";
pub const VISION_FALLBACK_WARNING: &str = "Gemini Vision analysis failed, using fallback description";
pub const DOWNLOAD_FAILED: &str = "Failed to download or validate image";

#[derive(Debug, Clone, Serialize)]
pub struct TextResponse {
    pub trace_id: TraceId,
    pub confidence: f64,
    pub processing_status: Status,
    pub enhanced_brief: String,
    pub product_response: ProductResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageResponse {
    pub trace_id: TraceId,
    pub warnings: Vec<String>,
    pub processing_status: Status,
    pub visual_brief: String,
    pub product_response: ProductResponse,
}

/// Clean and score seller text, then hand the brief to the product step.
///
/// Product-step failures are reported inside `product_response`.
pub async fn process_text(deps: &ServerDeps, text: &str, trace_id: TraceId) -> TextResponse {
    let brief = enhance(text);
    info!(trace_id = %trace_id, confidence = brief.confidence, "Enhanced seller text");

    let product = process_product(deps, Some(&brief.text), None, &trace_id).await;
    if let Err(ref e) = product {
        warn!(trace_id = %trace_id, error = %e, "Product step failed for seller text");
    }

    TextResponse {
        product_response: ProductResponse::from_result(trace_id.clone(), product),
        trace_id,
        confidence: brief.confidence,
        processing_status: Status::Success,
        enhanced_brief: brief.text,
    }
}

/// Download and describe a seller image, then hand the description to the
/// product step.
///
/// Warnings accumulate in `warnings` on both paths so the caller can report
/// them alongside an error.
pub async fn process_image(
    deps: &ServerDeps,
    image_url: &str,
    trace_id: TraceId,
    warnings: &mut Vec<String>,
) -> Result<ImageResponse, ShopcraftError> {
    let image_url = image_url.trim();
    if image_url.is_empty() {
        warnings.push("No image URL provided".to_string());
        return Err(ShopcraftError::Validation("Image URL is required".to_string()));
    }
    if !is_valid_url(image_url) {
        warnings.push("Invalid image URL format".to_string());
        return Err(ShopcraftError::Validation("Invalid URL format".to_string()));
    }

    let vision = deps.vision()?;

    let image = match deps.images.fetch(image_url, SELLER_IMAGE_TIMEOUT).await {
        Ok(image) => image,
        Err(e) => {
            warn!(trace_id = %trace_id, url = image_url, error = %e, "Seller image download failed");
            warnings.push(e.to_string());
            return Err(match e {
                FetchError::Timeout => ShopcraftError::Timeout(DOWNLOAD_FAILED.to_string()),
                _ => ShopcraftError::Upstream(DOWNLOAD_FAILED.to_string()),
            });
        }
    };
    warnings.extend(image.warnings.iter().cloned());

    let Some(mime_type) = image.mime_type() else {
        warn!(trace_id = %trace_id, url = image_url, "Downloaded bytes are not a recognizable image");
        warnings.push("Image validation failed: unrecognized image data".to_string());
        return Err(ShopcraftError::Upstream(DOWNLOAD_FAILED.to_string()));
    };

    let parts = vec![Part::text(VISION_PROMPT), Part::image(mime_type, image.bytes)];
    let visual_brief = match vision.generate(parts).await {
        Ok(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        Ok(_) => None,
        Err(e) => {
            warn!(trace_id = %trace_id, error = %e, "Vision analysis failed");
            None
        }
    };

    let visual_brief = visual_brief.unwrap_or_else(|| {
        warnings.push(VISION_FALLBACK_WARNING.to_string());
        VISION_FALLBACK_BRIEF.to_string()
    });

    info!(trace_id = %trace_id, warnings = warnings.len(), "Analyzed seller image");

    let product = process_product(deps, Some(&visual_brief), None, &trace_id).await;

    Ok(ImageResponse {
        product_response: ProductResponse::from_result(trace_id.clone(), product),
        trace_id,
        warnings: warnings.clone(),
        processing_status: Status::Success,
        visual_brief,
    })
}
