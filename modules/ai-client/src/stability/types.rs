use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub(crate) struct TextToImageRequest {
    pub text_prompts: Vec<TextPrompt>,
    pub cfg_scale: u32,
    pub width: u32,
    pub height: u32,
    pub steps: u32,
    pub samples: u32,
    pub style_preset: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct TextPrompt {
    pub text: String,
    pub weight: f32,
}

impl TextToImageRequest {
    pub fn photographic(prompt: &str, width: u32, height: u32) -> Self {
        Self {
            text_prompts: vec![TextPrompt {
                text: prompt.trim().to_string(),
                weight: 1.0,
            }],
            cfg_scale: 7,
            width,
            height,
            steps: 30,
            samples: 1,
            style_preset: "photographic".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct TextToImageResponse {
    #[serde(default)]
    pub artifacts: Vec<Artifact>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Artifact {
    pub base64: Option<String>,
    pub seed: Option<u64>,
    #[serde(rename = "finishReason")]
    pub finish_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn photographic_request_matches_wire_shape() {
        let request = TextToImageRequest::photographic("  walnut desk lamp ", 1024, 768);
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["text_prompts"][0]["text"], "walnut desk lamp");
        assert_eq!(value["text_prompts"][0]["weight"], 1.0);
        assert_eq!(value["cfg_scale"], 7);
        assert_eq!(value["width"], 1024);
        assert_eq!(value["height"], 768);
        assert_eq!(value["steps"], 30);
        assert_eq!(value["samples"], 1);
        assert_eq!(value["style_preset"], "photographic");
    }

    #[test]
    fn response_parses_artifacts() {
        let raw = r#"{"artifacts": [{"base64": "iVBORw0KGgo=", "seed": 42, "finishReason": "SUCCESS"}]}"#;
        let response: TextToImageResponse = serde_json::from_str(raw).unwrap();
        let artifact = &response.artifacts[0];
        assert_eq!(artifact.base64.as_deref(), Some("iVBORw0KGgo="));
        assert_eq!(artifact.seed, Some(42));
        assert_eq!(artifact.finish_reason.as_deref(), Some("SUCCESS"));
    }
}
