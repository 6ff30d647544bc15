//! Normalization of the model's video-direction answer.
//!
//! Same contract as [`crate::strategy`]: always returns a complete
//! [`VideoEnhancement`], falling back to a templated concept when the model
//! text is not a JSON object.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::media::AspectRatio;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoConcept {
    pub visual_style: String,
    pub scenes: Vec<String>,
    pub camera_movements: Vec<String>,
    pub lighting: String,
    pub colors: String,
    pub audio_suggestions: String,
    pub technical_notes: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnhancementKind {
    Model,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoEnhancement {
    pub enhanced_prompt: String,
    pub video_concept: VideoConcept,
    pub kind: EnhancementKind,
}

pub fn normalize_video_enhancement(
    raw_model_text: &str,
    description: &str,
    aspect_ratio: AspectRatio,
    duration_seconds: u32,
) -> VideoEnhancement {
    match serde_json::from_str::<Value>(raw_model_text.trim()) {
        Ok(Value::Object(fields)) => from_fields(&fields, description, aspect_ratio),
        Ok(_) | Err(_) => {
            warn!("Video enhancement response is not a JSON object; using fallback concept");
            fallback_enhancement(description, aspect_ratio, duration_seconds)
        }
    }
}

pub fn fallback_enhancement(
    description: &str,
    aspect_ratio: AspectRatio,
    duration_seconds: u32,
) -> VideoEnhancement {
    let ratio = aspect_ratio.as_str();
    VideoEnhancement {
        enhanced_prompt: format!(
            "Professional video: {description}. Duration: {duration_seconds}s. Style: cinematic commercial. \
             Lighting: professional studio setup. Camera: smooth movements. Aspect ratio: {ratio}."
        ),
        video_concept: VideoConcept {
            visual_style: "Professional commercial".to_string(),
            scenes: vec![format!("Main scene: {description}")],
            camera_movements: vec!["Smooth pan".to_string()],
            lighting: "Professional lighting".to_string(),
            colors: "Natural colors".to_string(),
            audio_suggestions: "Background music".to_string(),
            technical_notes: format!("Optimized for {ratio}"),
        },
        kind: EnhancementKind::Fallback,
    }
}

fn from_fields(
    fields: &Map<String, Value>,
    description: &str,
    aspect_ratio: AspectRatio,
) -> VideoEnhancement {
    let enhanced_prompt = match fields.get("enhanced_prompt") {
        Some(Value::String(s)) => s.clone(),
        _ => description.to_string(),
    };

    let empty = Map::new();
    let concept = match fields.get("video_concept") {
        Some(Value::Object(c)) => c,
        _ => &empty,
    };

    let scene_seed: String = description.chars().take(50).collect();

    let video_concept = VideoConcept {
        visual_style: text_or(concept, "visual_style", "Professional commercial style"),
        scenes: list_or(concept, "scenes", || vec![format!("Scene 1: {scene_seed}")]),
        camera_movements: list_or(concept, "camera_movements", || {
            vec!["Smooth pan".to_string(), "Static shot".to_string()]
        }),
        lighting: text_or(concept, "lighting", "Professional studio lighting"),
        colors: text_or(concept, "colors", "Natural, vibrant colors"),
        audio_suggestions: text_or(concept, "audio_suggestions", "Background music, ambient sound"),
        technical_notes: text_or(
            concept,
            "technical_notes",
            &format!("Optimized for {} aspect ratio", aspect_ratio.as_str()),
        ),
    };

    VideoEnhancement {
        enhanced_prompt,
        video_concept,
        kind: EnhancementKind::Model,
    }
}

fn text_or(concept: &Map<String, Value>, key: &str, default: &str) -> String {
    match concept.get(key) {
        Some(Value::String(s)) => s.clone(),
        _ => default.to_string(),
    }
}

fn list_or(
    concept: &Map<String, Value>,
    key: &str,
    default: impl FnOnce() -> Vec<String>,
) -> Vec<String> {
    concept
        .get(key)
        .and_then(Value::as_array)
        .and_then(|items| {
            items
                .iter()
                .map(|v| v.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
        })
        .unwrap_or_else(default)
}
