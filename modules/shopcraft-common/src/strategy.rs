//! Turns free-form model output into a fully populated [`ProductStrategy`].
//!
//! Two independent degradation layers:
//!
//! 1. Text that is not a JSON object is replaced wholesale by a strategy
//!    derived from the seller's own text ([`fallback_strategy`]).
//! 2. A JSON object with missing or mistyped fields keeps what it got right
//!    and gets placeholders for the rest.
//!
//! Neither layer can fail, so [`normalize`] is total.

use serde_json::{Map, Value};
use tracing::warn;

use crate::types::ProductStrategy;

pub const FALLBACK_TITLE: &str = "Specific Product";
pub const FALLBACK_DESCRIPTION: &str = "Specific product with unique features and characteristics";
pub const FALLBACK_SLOGAN: &str = "Quality You Can Trust";
pub const FALLBACK_IMAGE_DESCRIPTION: &str = "Professional product photography showing actual item";
pub const FALLBACK_VIDEO_DESCRIPTION: &str = "Product demonstration video showing real usage";

/// Hashtags used when the model's output could not be parsed at all.
pub const FALLBACK_HASHTAGS: &[&str] = &["#product", "#quality", "#authentic", "#specific", "#real"];

/// Hashtags used when the model answered but its `hashtags` was unusable.
pub const DEFAULT_HASHTAGS: &[&str] = &["#product", "#quality", "#sale"];

const TITLE_MAX_CHARS: usize = 50;
const DESCRIPTION_MAX_CHARS: usize = 300;

/// Which path produced a strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Normalized {
    /// The model returned a JSON object; missing fields were filled in.
    Parsed(ProductStrategy),
    /// The model's text was unusable; derived from the seller's text instead.
    Fallback(ProductStrategy),
}

impl Normalized {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Normalized::Fallback(_))
    }

    pub fn strategy(&self) -> &ProductStrategy {
        match self {
            Normalized::Parsed(s) | Normalized::Fallback(s) => s,
        }
    }

    pub fn into_strategy(self) -> ProductStrategy {
        match self {
            Normalized::Parsed(s) | Normalized::Fallback(s) => s,
        }
    }
}

/// Normalize model output, falling back to `fallback_seed` when it is not a JSON object.
pub fn normalize(raw_model_text: &str, fallback_seed: &str) -> ProductStrategy {
    normalize_with_outcome(raw_model_text, fallback_seed).into_strategy()
}

pub fn normalize_with_outcome(raw_model_text: &str, fallback_seed: &str) -> Normalized {
    match serde_json::from_str::<Value>(raw_model_text.trim()) {
        Ok(Value::Object(fields)) => Normalized::Parsed(from_fields(&fields)),
        Ok(other) => {
            warn!(kind = json_kind(&other), "Model response is JSON but not an object; using fallback strategy");
            Normalized::Fallback(fallback_strategy(fallback_seed))
        }
        Err(e) => {
            warn!(error = %e, "Model response is not valid JSON; using fallback strategy");
            Normalized::Fallback(fallback_strategy(fallback_seed))
        }
    }
}

/// Deterministic strategy derived from the seller's text.
pub fn fallback_strategy(seed: &str) -> ProductStrategy {
    let title = derive_title(seed);

    let description = if seed.is_empty() {
        FALLBACK_DESCRIPTION.to_string()
    } else {
        format!("{}...", take_chars(seed, DESCRIPTION_MAX_CHARS))
    };

    match title {
        Some(title) => ProductStrategy {
            slogan: format!("Experience the {title}"),
            image_description: format!(
                "Clear, professional photograph of {title} showing its actual appearance, colors, and design details"
            ),
            video_description: format!(
                "Video demonstration of {title} being used in real scenarios, showing its actual functionality and features"
            ),
            hashtags: to_owned_tags(FALLBACK_HASHTAGS),
            description,
            title,
        },
        None => ProductStrategy {
            title: FALLBACK_TITLE.to_string(),
            description,
            slogan: FALLBACK_SLOGAN.to_string(),
            hashtags: to_owned_tags(FALLBACK_HASHTAGS),
            image_description: FALLBACK_IMAGE_DESCRIPTION.to_string(),
            video_description: FALLBACK_VIDEO_DESCRIPTION.to_string(),
        },
    }
}

/// Text before the first period, capped at 50 characters. `None` when that is empty.
fn derive_title(seed: &str) -> Option<String> {
    let first = seed.split('.').next().unwrap_or_default();
    if first.is_empty() {
        None
    } else {
        Some(take_chars(first, TITLE_MAX_CHARS).to_string())
    }
}

fn from_fields(fields: &Map<String, Value>) -> ProductStrategy {
    ProductStrategy {
        title: string_field(fields, "title"),
        description: string_field(fields, "description"),
        slogan: string_field(fields, "slogan"),
        hashtags: hashtags_field(fields),
        image_description: string_field(fields, "image_description"),
        video_description: string_field(fields, "video_description"),
    }
}

fn string_field(fields: &Map<String, Value>, name: &str) -> String {
    match fields.get(name) {
        Some(Value::String(s)) => s.clone(),
        _ => placeholder(name),
    }
}

/// Only a list made entirely of strings is kept; anything else is replaced whole.
fn hashtags_field(fields: &Map<String, Value>) -> Vec<String> {
    let Some(Value::Array(items)) = fields.get("hashtags") else {
        return to_owned_tags(DEFAULT_HASHTAGS);
    };

    items
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect::<Option<Vec<_>>>()
        .unwrap_or_else(|| to_owned_tags(DEFAULT_HASHTAGS))
}

pub fn placeholder(field: &str) -> String {
    format!("Generated {field} unavailable")
}

fn take_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

fn to_owned_tags(tags: &[&str]) -> Vec<String> {
    tags.iter().map(|t| t.to_string()).collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
