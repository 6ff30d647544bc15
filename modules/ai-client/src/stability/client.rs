use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use tracing::debug;

use super::types::*;
use crate::error::AiError;
use crate::util::truncate_to_char_boundary;

const STABILITY_API_URL: &str = "https://api.stability.ai/v1";

pub(crate) struct StabilityClient {
    api_key: String,
    http: reqwest::Client,
    base_url: String,
}

impl StabilityClient {
    pub fn new(api_key: &str, http: reqwest::Client) -> Self {
        Self {
            api_key: api_key.to_string(),
            http,
            base_url: STABILITY_API_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    fn headers(&self) -> Result<HeaderMap, AiError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    pub async fn text_to_image(
        &self,
        engine: &str,
        request: &TextToImageRequest,
    ) -> Result<TextToImageResponse, AiError> {
        let url = format!("{}/generation/{}/text-to-image", self.base_url, engine);

        debug!(
            engine,
            width = request.width,
            height = request.height,
            "Stability text-to-image request"
        );

        let response = self
            .http
            .post(&url)
            .headers(self.headers()?)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response.text().await?;
            return Err(AiError::Api {
                status,
                message: error_detail(status, &error_text),
            });
        }

        Ok(response.json().await?)
    }
}

/// Human-readable detail from a Stability error body.
pub(crate) fn error_detail(status: u16, body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => match value.get("message").and_then(|m| m.as_str()) {
            Some(message) => message.to_string(),
            None => value.to_string(),
        },
        Err(_) => format!("HTTP {}: {}", status, truncate_to_char_boundary(body, 200)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_detail_prefers_message_field() {
        let body = r#"{"id": "abc", "name": "invalid_prompts", "message": "prompt is empty"}"#;
        assert_eq!(error_detail(400, body), "prompt is empty");
    }

    #[test]
    fn error_detail_falls_back_to_raw_json() {
        assert_eq!(error_detail(500, r#"{"name":"oops"}"#), r#"{"name":"oops"}"#);
    }

    #[test]
    fn error_detail_for_non_json_body() {
        let body = "x".repeat(300);
        let detail = error_detail(502, &body);
        assert_eq!(detail, format!("HTTP 502: {}", "x".repeat(200)));
    }
}
