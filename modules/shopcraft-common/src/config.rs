use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash-exp";
const DEFAULT_GEMINI_VISION_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_STABILITY_ENGINE: &str = "stable-diffusion-xl-1024-v1-0";

/// Application configuration loaded from environment variables.
///
/// Provider keys are optional: the server starts without them and the
/// requests that need a missing provider fail individually.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // Server
    pub host: String,
    pub port: u16,
    pub public_base_url: String,

    // AI / LLM
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_vision_model: String,

    // Image generation
    pub stability_api_key: Option<String>,
    pub stability_engine: String,

    // Generated media
    pub media_dir: PathBuf,

    // CORS
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port: u16 = match var("PORT") {
            Some(p) => p.trim().parse().context("PORT must be a number")?,
            None => 8000,
        };

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            public_base_url: var("PUBLIC_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| format!("http://localhost:{port}")),
            gemini_api_key: var("GEMINI_API_KEY"),
            gemini_model: var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_vision_model: var("GEMINI_VISION_MODEL")
                .unwrap_or_else(|| DEFAULT_GEMINI_VISION_MODEL.to_string()),
            stability_api_key: var("STABILITY_API_KEY"),
            stability_engine: var("STABILITY_ENGINE")
                .unwrap_or_else(|| DEFAULT_STABILITY_ENGINE.to_string()),
            media_dir: var("MEDIA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            allowed_origins: var("ALLOWED_ORIGINS")
                .unwrap_or_default()
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
