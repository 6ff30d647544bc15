use std::sync::Arc;
use std::time::Duration;

use ai_client::{ContentModel, Gemini, ImageModel, Stability};
use anyhow::{Context, Result};
use tracing::{info, warn};

use shopcraft_common::{AppConfig, ShopcraftError};

use crate::fetch::{HttpImageSource, ImageSource};
use crate::storage::MediaStore;

const IMAGE_GENERATION_TIMEOUT: Duration = Duration::from_secs(60);

/// Shared dependencies for every request handler.
///
/// Providers are optional so the server can start without credentials;
/// the handlers that need a missing provider report it per request.
pub struct ServerDeps {
    pub http_client: reqwest::Client,
    pub strategist: Option<Arc<dyn ContentModel>>,
    pub vision: Option<Arc<dyn ContentModel>>,
    pub image_generator: Option<Arc<dyn ImageModel>>,
    pub images: Arc<dyn ImageSource>,
    pub media: MediaStore,
    pub config: AppConfig,
}

impl ServerDeps {
    pub fn new(
        http_client: reqwest::Client,
        strategist: Option<Arc<dyn ContentModel>>,
        vision: Option<Arc<dyn ContentModel>>,
        image_generator: Option<Arc<dyn ImageModel>>,
        images: Arc<dyn ImageSource>,
        config: AppConfig,
    ) -> Self {
        let media = MediaStore::new(config.media_dir.clone(), config.public_base_url.clone());
        Self {
            http_client,
            strategist,
            vision,
            image_generator,
            images,
            media,
            config,
        }
    }

    /// Wire the real provider clients from configuration.
    pub fn from_config(config: AppConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .build()
            .context("Failed to build HTTP client")?;

        let (strategist, vision) = match config.gemini_api_key.as_deref() {
            Some(key) => {
                let vision = Gemini::new(key, &config.gemini_vision_model)
                    .with_http_client(http_client.clone());
                // Strategies and video concepts are parsed as JSON; image analysis is prose.
                let gemini = vision
                    .with_model(&config.gemini_model)
                    .with_json_output();
                info!(
                    model = %config.gemini_model,
                    vision_model = %config.gemini_vision_model,
                    "Gemini configured"
                );
                (
                    Some(Arc::new(gemini) as Arc<dyn ContentModel>),
                    Some(Arc::new(vision) as Arc<dyn ContentModel>),
                )
            }
            None => {
                warn!("GEMINI_API_KEY not set; text and image analysis are disabled");
                (None, None)
            }
        };

        let image_generator = match config.stability_api_key.as_deref() {
            Some(key) => {
                let http = reqwest::Client::builder()
                    .timeout(IMAGE_GENERATION_TIMEOUT)
                    .build()
                    .context("Failed to build image generation HTTP client")?;
                let stability = Stability::new(key, &config.stability_engine).with_http_client(http);
                info!(engine = %config.stability_engine, "Stability configured");
                Some(Arc::new(stability) as Arc<dyn ImageModel>)
            }
            None => {
                warn!("STABILITY_API_KEY not set; image generation is disabled");
                None
            }
        };

        let images: Arc<dyn ImageSource> = Arc::new(HttpImageSource::new(http_client.clone()));

        Ok(Self::new(
            http_client,
            strategist,
            vision,
            image_generator,
            images,
            config,
        ))
    }

    pub fn strategist(&self) -> Result<&Arc<dyn ContentModel>, ShopcraftError> {
        self.strategist
            .as_ref()
            .ok_or_else(|| ShopcraftError::Config("GEMINI_API_KEY not configured".to_string()))
    }

    pub fn vision(&self) -> Result<&Arc<dyn ContentModel>, ShopcraftError> {
        self.vision
            .as_ref()
            .ok_or_else(|| ShopcraftError::Config("GEMINI_API_KEY not configured".to_string()))
    }

    pub fn image_generator(&self) -> Result<&Arc<dyn ImageModel>, ShopcraftError> {
        self.image_generator
            .as_ref()
            .ok_or_else(|| ShopcraftError::Config("STABILITY_API_KEY not configured".to_string()))
    }
}
