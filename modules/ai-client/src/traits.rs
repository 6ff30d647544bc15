use crate::error::AiError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// =============================================================================
// Content Parts
// =============================================================================

/// One piece of a multimodal prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    Text(String),
    InlineImage { mime_type: String, data: Vec<u8> },
}

impl Part {
    pub fn text(content: impl Into<String>) -> Self {
        Part::Text(content.into())
    }

    pub fn image(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Part::InlineImage {
            mime_type: mime_type.into(),
            data,
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, Part::InlineImage { .. })
    }
}

// =============================================================================
// ContentModel Trait
// =============================================================================

/// A generative model that turns prompt parts into text.
#[async_trait]
pub trait ContentModel: Send + Sync {
    async fn generate(&self, parts: Vec<Part>) -> Result<String, AiError>;

    /// Model identifier, for logs and response metadata.
    fn model_name(&self) -> &str;
}

// =============================================================================
// ImageModel Trait
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRequest {
    pub prompt: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedImage {
    /// PNG bytes, base64-encoded as returned by the provider.
    pub base64: String,
    pub seed: Option<u64>,
    pub finish_reason: Option<String>,
}

/// A text-to-image generator.
#[async_trait]
pub trait ImageModel: Send + Sync {
    async fn text_to_image(&self, request: &ImageRequest) -> Result<GeneratedImage, AiError>;
}
