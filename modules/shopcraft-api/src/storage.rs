use std::path::{Path, PathBuf};

use base64::Engine;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use shopcraft_common::{ShopcraftError, TraceId};

pub const IMAGES_DIR: &str = "generated_images";
pub const VIDEOS_DIR: &str = "generated_videos";

/// A file written under the media root, with the URL it is served from.
#[derive(Debug, Clone, Serialize)]
pub struct StoredFile {
    pub file_name: String,
    pub local_path: String,
    pub download_url: String,
    pub file_size: u64,
    pub created_at: DateTime<Utc>,
}

/// Writes generated media below `root` and builds their public download URLs.
#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
    public_base_url: String,
}

impl MediaStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn images_dir(&self) -> PathBuf {
        self.root.join(IMAGES_DIR)
    }

    pub fn videos_dir(&self) -> PathBuf {
        self.root.join(VIDEOS_DIR)
    }

    /// Decode a base64 PNG and write it as `image_{trace}_{timestamp}.png`.
    pub async fn save_image(
        &self,
        image_base64: &str,
        trace_id: &TraceId,
    ) -> Result<StoredFile, ShopcraftError> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(image_base64.trim())
            .map_err(|e| ShopcraftError::Storage(format!("Invalid image data: {e}")))?;

        let now = Utc::now();
        let file_name = format!("image_{}_{}.png", file_stem(trace_id), timestamp(&now));
        self.write(&self.images_dir(), "images", file_name, &bytes, now)
            .await
    }

    /// Write the JSON description of a video that has not been rendered.
    pub async fn save_video_placeholder(
        &self,
        metadata: &impl Serialize,
        trace_id: &TraceId,
    ) -> Result<StoredFile, ShopcraftError> {
        let bytes = serde_json::to_vec_pretty(metadata)
            .map_err(|e| ShopcraftError::Storage(format!("Failed to encode video metadata: {e}")))?;

        let now = Utc::now();
        let file_name = format!("video_{}_{}.json", file_stem(trace_id), timestamp(&now));
        self.write(&self.videos_dir(), "videos", file_name, &bytes, now)
            .await
    }

    async fn write(
        &self,
        dir: &Path,
        route: &str,
        file_name: String,
        bytes: &[u8],
        created_at: DateTime<Utc>,
    ) -> Result<StoredFile, ShopcraftError> {
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(&file_name);
        tokio::fs::write(&path, bytes).await?;

        info!(path = %path.display(), bytes = bytes.len(), "Saved generated media");

        Ok(StoredFile {
            download_url: format!("{}/downloads/{route}/{file_name}", self.public_base_url),
            local_path: path.display().to_string(),
            file_size: bytes.len() as u64,
            file_name,
            created_at,
        })
    }
}

fn timestamp(now: &DateTime<Utc>) -> String {
    now.format("%Y%m%d_%H%M%S").to_string()
}

/// Caller-supplied trace ids end up in file names; keep only safe characters.
fn file_stem(trace_id: &TraceId) -> String {
    let stem: String = trace_id
        .as_str()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    if stem.is_empty() {
        "trace".to_string()
    } else {
        stem
    }
}
