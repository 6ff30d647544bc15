mod client;
pub(crate) mod types;

use crate::error::AiError;
use crate::traits::{GeneratedImage, ImageModel, ImageRequest};
use async_trait::async_trait;

use client::StabilityClient;
use types::*;

// =============================================================================
// Stability Image Generator
// =============================================================================

#[derive(Clone)]
pub struct Stability {
    api_key: String,
    engine: String,
    http: reqwest::Client,
    base_url: Option<String>,
}

impl Stability {
    pub fn new(api_key: impl Into<String>, engine: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            engine: engine.into(),
            http: reqwest::Client::new(),
            base_url: None,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn engine(&self) -> &str {
        &self.engine
    }

    pub(crate) fn client(&self) -> StabilityClient {
        let client = StabilityClient::new(&self.api_key, self.http.clone());
        if let Some(ref url) = self.base_url {
            client.with_base_url(url)
        } else {
            client
        }
    }
}

#[async_trait]
impl ImageModel for Stability {
    async fn text_to_image(&self, request: &ImageRequest) -> Result<GeneratedImage, AiError> {
        let wire = TextToImageRequest::photographic(&request.prompt, request.width, request.height);
        let response = self.client().text_to_image(&self.engine, &wire).await?;

        let artifact = response
            .artifacts
            .into_iter()
            .next()
            .ok_or_else(|| AiError::EmptyResponse("No artifacts in API response".into()))?;

        let base64 = artifact
            .base64
            .filter(|b| !b.is_empty())
            .ok_or_else(|| AiError::EmptyResponse("No image data in API response".into()))?;

        Ok(GeneratedImage {
            base64,
            seed: artifact.seed,
            finish_reason: artifact.finish_reason,
        })
    }
}
