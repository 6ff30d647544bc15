use ai_client::{preview, strip_code_blocks, AiError, ImageRequest, Part};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use shopcraft_common::media::{
    clamp_image_dimension, clamp_video_duration, format_file_size, AspectRatio,
};
use shopcraft_common::{
    normalize_video_enhancement, EnhancementKind, ShopcraftError, Status, TraceId, VideoConcept,
};

use crate::deps::ServerDeps;
use crate::prompts::video_prompt;

use super::upstream;

pub const DEFAULT_IMAGE_DIMENSION: u32 = 1024;
pub const DEFAULT_VIDEO_DURATION: u32 = 4;
pub const VIDEO_PROVIDER: &str = "gemini_enhanced";

#[derive(Debug, Clone, Serialize)]
pub struct ImageGeneration {
    pub trace_id: TraceId,
    pub generation_status: Status,
    /// `data:image/png;base64,...`
    pub image_url: String,
    pub image_base64: String,
    pub download_url: Option<String>,
    pub local_path: Option<String>,
    pub file_size: Option<String>,
    pub description: String,
    pub width: u32,
    pub height: u32,
    pub seed: Option<u64>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TechnicalSpecs {
    pub enhanced_by: String,
    pub enhancement_type: EnhancementKind,
    pub scene_breakdown: Vec<String>,
    pub visual_style: String,
    pub camera_movements: Vec<String>,
    pub lighting: String,
    pub audio_suggestions: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VideoGeneration {
    pub trace_id: TraceId,
    pub generation_status: Status,
    pub original_description: String,
    pub enhanced_description: String,
    pub video_concept: VideoConcept,
    pub duration_seconds: u32,
    pub aspect_ratio: AspectRatio,
    pub video_file: String,
    pub video_url: String,
    pub local_path: String,
    pub file_size: String,
    pub provider: &'static str,
    pub technical_specs: TechnicalSpecs,
}

/// Contents of the placeholder file written instead of a rendered video.
#[derive(Debug, Serialize)]
struct VideoPlaceholder<'a> {
    trace_id: &'a TraceId,
    enhanced_description: &'a str,
    duration_seconds: u32,
    aspect_ratio: AspectRatio,
    created_at: DateTime<Utc>,
    #[serde(rename = "type")]
    kind: &'static str,
    video_specs: VideoSpecs,
}

#[derive(Debug, Serialize)]
struct VideoSpecs {
    format: &'static str,
    resolution: &'static str,
    framerate: &'static str,
    duration: String,
}

/// Render a product photo from a description and keep a copy on disk.
///
/// A storage failure does not fail the generation; the download fields are
/// left empty instead.
pub async fn generate_image(
    deps: &ServerDeps,
    description: &str,
    width: Option<u32>,
    height: Option<u32>,
    trace_id: TraceId,
) -> Result<ImageGeneration, ShopcraftError> {
    let generator = deps.image_generator()?;

    let description = description.trim();
    if description.is_empty() {
        return Err(ShopcraftError::Validation("Description cannot be empty".to_string()));
    }

    let width = clamp_image_dimension(width.unwrap_or(DEFAULT_IMAGE_DIMENSION));
    let height = clamp_image_dimension(height.unwrap_or(DEFAULT_IMAGE_DIMENSION));

    info!(
        trace_id = %trace_id,
        width,
        height,
        description = %preview(description, 100),
        "Generating image"
    );

    let request = ImageRequest {
        prompt: description.to_string(),
        width,
        height,
    };
    let image = generator
        .text_to_image(&request)
        .await
        .map_err(image_generation_error)?;

    let stored = match deps.media.save_image(&image.base64, &trace_id).await {
        Ok(stored) => Some(stored),
        Err(e) => {
            warn!(trace_id = %trace_id, error = %e, "Failed to save generated image");
            None
        }
    };

    Ok(ImageGeneration {
        image_url: format!("data:image/png;base64,{}", image.base64),
        download_url: stored.as_ref().map(|s| s.download_url.clone()),
        local_path: stored.as_ref().map(|s| s.local_path.clone()),
        file_size: stored.as_ref().map(|s| format_file_size(s.file_size)),
        image_base64: image.base64,
        trace_id,
        generation_status: Status::Success,
        description: description.to_string(),
        width,
        height,
        seed: image.seed,
        finish_reason: image.finish_reason,
    })
}

fn image_generation_error(err: AiError) -> ShopcraftError {
    if err.is_timeout() {
        return ShopcraftError::Timeout(
            "Request timeout - image generation took too long".to_string(),
        );
    }
    match err {
        AiError::Api { message, .. } => {
            ShopcraftError::Upstream(format!("Stability AI API error: {message}"))
        }
        AiError::EmptyResponse(message) => ShopcraftError::Upstream(message),
        other => upstream("Image generation failed", other),
    }
}

/// Expand a video idea into a shot-level concept and record it as a
/// placeholder file.
pub async fn generate_video(
    deps: &ServerDeps,
    description: &str,
    duration_seconds: Option<u32>,
    aspect_ratio: Option<&str>,
    trace_id: TraceId,
) -> Result<VideoGeneration, ShopcraftError> {
    let model = deps.strategist()?;

    let description = description.trim();
    if description.is_empty() {
        return Err(ShopcraftError::Validation("Description cannot be empty".to_string()));
    }

    let duration_seconds = clamp_video_duration(duration_seconds.unwrap_or(DEFAULT_VIDEO_DURATION));
    let aspect_ratio = AspectRatio::parse_or_default(aspect_ratio.unwrap_or_default());

    info!(
        trace_id = %trace_id,
        duration_seconds,
        aspect_ratio = %aspect_ratio,
        description = %preview(description, 100),
        "Enhancing video description"
    );

    let prompt = video_prompt(description, duration_seconds, aspect_ratio);
    let raw = model
        .generate(vec![Part::text(prompt)])
        .await
        .map_err(|e| upstream("Gemini enhancement failed", e))?;

    let enhancement = normalize_video_enhancement(
        strip_code_blocks(&raw),
        description,
        aspect_ratio,
        duration_seconds,
    );

    let created_at = Utc::now();
    let placeholder = VideoPlaceholder {
        trace_id: &trace_id,
        enhanced_description: &enhancement.enhanced_prompt,
        duration_seconds,
        aspect_ratio,
        created_at,
        kind: "placeholder_video",
        video_specs: VideoSpecs {
            format: "mp4",
            resolution: aspect_ratio.resolution(),
            framerate: "30fps",
            duration: format!("{duration_seconds}s"),
        },
    };
    let stored = deps
        .media
        .save_video_placeholder(&placeholder, &trace_id)
        .await
        .map_err(|e| ShopcraftError::Storage(format!("Video file creation failed: {}", e.message())))?;

    info!(
        trace_id = %trace_id,
        file = %stored.file_name,
        kind = ?enhancement.kind,
        "Video concept saved"
    );

    let concept = enhancement.video_concept;
    Ok(VideoGeneration {
        technical_specs: TechnicalSpecs {
            enhanced_by: model.model_name().to_string(),
            enhancement_type: enhancement.kind,
            scene_breakdown: concept.scenes.clone(),
            visual_style: concept.visual_style.clone(),
            camera_movements: concept.camera_movements.clone(),
            lighting: concept.lighting.clone(),
            audio_suggestions: concept.audio_suggestions.clone(),
            created_at,
        },
        trace_id,
        generation_status: Status::Success,
        original_description: description.to_string(),
        enhanced_description: enhancement.enhanced_prompt,
        video_concept: concept,
        duration_seconds,
        aspect_ratio,
        video_file: stored.file_name,
        video_url: stored.download_url,
        local_path: stored.local_path,
        file_size: format_file_size(stored.file_size),
        provider: VIDEO_PROVIDER,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_message_is_user_facing() {
        let err = image_generation_error(AiError::Timeout("60s".into()));
        assert_eq!(err.message(), "Request timeout - image generation took too long");
        assert!(matches!(err, ShopcraftError::Timeout(_)));
    }

    #[test]
    fn api_error_names_the_vendor() {
        let err = image_generation_error(AiError::Api {
            status: 400,
            message: "invalid height".into(),
        });
        assert_eq!(err.message(), "Stability AI API error: invalid height");
    }
}
