mod client;
pub(crate) mod types;

use crate::error::AiError;
use crate::traits::{ContentModel, Part};
use async_trait::async_trait;
use base64::Engine;
use tracing::debug;

use client::GeminiClient;
use types::*;

// =============================================================================
// Gemini Agent
// =============================================================================

#[derive(Clone)]
pub struct Gemini {
    api_key: String,
    model: String,
    http: reqwest::Client,
    base_url: Option<String>,
    temperature: Option<f32>,
    json_output: bool,
}

impl Gemini {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            http: reqwest::Client::new(),
            base_url: None,
            temperature: None,
            json_output: false,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Share a pre-configured HTTP client (timeouts, pooling).
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Ask the model to answer with a JSON document only.
    pub fn with_json_output(mut self) -> Self {
        self.json_output = true;
        self
    }

    /// Same credentials and transport, different model.
    pub fn with_model(&self, model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..self.clone()
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub(crate) fn client(&self) -> GeminiClient {
        let client = GeminiClient::new(&self.api_key, self.http.clone());
        if let Some(ref url) = self.base_url {
            client.with_base_url(url)
        } else {
            client
        }
    }

    pub(crate) fn build_request(&self, parts: Vec<Part>) -> GenerateContentRequest {
        let wire_parts = parts
            .into_iter()
            .map(|part| match part {
                Part::Text(text) => WirePart::Text { text },
                Part::InlineImage { mime_type, data } => WirePart::InlineData {
                    inline_data: InlineData {
                        mime_type,
                        data: base64::engine::general_purpose::STANDARD.encode(data),
                    },
                },
            })
            .collect();

        let config = GenerationConfig {
            temperature: self.temperature,
            response_mime_type: self
                .json_output
                .then(|| "application/json".to_string()),
        };

        GenerateContentRequest {
            contents: vec![Content::user(wire_parts)],
            generation_config: (!config.is_empty()).then_some(config),
        }
    }
}

// =============================================================================
// ContentModel Implementation
// =============================================================================

#[async_trait]
impl ContentModel for Gemini {
    async fn generate(&self, parts: Vec<Part>) -> Result<String, AiError> {
        let has_image = parts.iter().any(Part::is_image);
        let request = self.build_request(parts);

        let response = self.client().generate_content(&self.model, &request).await?;

        debug!(
            model = %self.model,
            has_image,
            finish_reason = response.finish_reason().unwrap_or("unknown"),
            "Gemini response received"
        );

        response
            .text()
            .map(|t| t.trim().to_string())
            .ok_or_else(|| AiError::EmptyResponse("No response from Gemini API".into()))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
