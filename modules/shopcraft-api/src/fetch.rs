use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use thiserror::Error;
use tracing::debug;

const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko)";

/// Seller image analysis waits longer than the combined product step.
pub const SELLER_IMAGE_TIMEOUT: Duration = Duration::from_secs(30);
pub const PRODUCT_IMAGE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Image download timed out")]
    Timeout,

    #[error("Failed to download image: {0}")]
    Request(String),

    #[error("Downloaded image is empty")]
    Empty,
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Request(e.to_string())
        }
    }
}

/// Raw bytes of a remote image plus what the server claimed they were.
#[derive(Debug, Clone)]
pub struct FetchedImage {
    pub bytes: Vec<u8>,
    /// Lower-cased media type without parameters, e.g. `image/png`.
    pub content_type: String,
    pub warnings: Vec<String>,
}

impl FetchedImage {
    pub fn new(bytes: Vec<u8>, content_type: &str) -> Self {
        let content_type = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_lowercase();

        let mut warnings = Vec::new();
        if !content_type.starts_with("image/") {
            warnings.push(format!("Unexpected content type: {content_type}"));
        }

        Self {
            bytes,
            content_type,
            warnings,
        }
    }

    pub fn declared_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }

    /// Media type to hand to a vision model: what the bytes look like,
    /// else what the server declared. `None` when neither says image.
    pub fn mime_type(&self) -> Option<String> {
        sniff_image_type(&self.bytes)
            .map(str::to_string)
            .or_else(|| self.declared_image().then(|| self.content_type.clone()))
    }
}

/// Source of product images; the HTTP implementation is swapped out in tests.
#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<FetchedImage, FetchError>;
}

pub struct HttpImageSource {
    http: reqwest::Client,
}

impl HttpImageSource {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ImageSource for HttpImageSource {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<FetchedImage, FetchError> {
        debug!(url, "Downloading image");

        let response = self
            .http
            .get(url)
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .timeout(timeout)
            .send()
            .await?
            .error_for_status()?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let bytes = response.bytes().await?.to_vec();
        if bytes.is_empty() {
            return Err(FetchError::Empty);
        }

        Ok(FetchedImage::new(bytes, &content_type))
    }
}

/// True for absolute URLs with both a scheme and a host.
pub fn is_valid_url(raw: &str) -> bool {
    match url::Url::parse(raw.trim()) {
        Ok(parsed) => !parsed.scheme().is_empty() && parsed.host_str().is_some_and(|h| !h.is_empty()),
        Err(_) => false,
    }
}

/// Recognize common image formats by their magic bytes.
pub fn sniff_image_type(bytes: &[u8]) -> Option<&'static str> {
    match bytes {
        [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, ..] => Some("image/png"),
        [0xFF, 0xD8, 0xFF, ..] => Some("image/jpeg"),
        [b'G', b'I', b'F', b'8', ..] => Some("image/gif"),
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => Some("image/webp"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn valid_urls_need_scheme_and_host() {
        assert!(is_valid_url("https://cdn.example.com/lamp.png"));
        assert!(is_valid_url("http://127.0.0.1:9000/a.jpg"));
        assert!(!is_valid_url("cdn.example.com/lamp.png"));
        assert!(!is_valid_url("file:///tmp/lamp.png"));
        assert!(!is_valid_url("not a url"));
        assert!(!is_valid_url(""));
    }

    #[test]
    fn sniffs_known_formats() {
        assert_eq!(sniff_image_type(&PNG_HEADER), Some("image/png"));
        assert_eq!(sniff_image_type(&[0xFF, 0xD8, 0xFF, 0xE0]), Some("image/jpeg"));
        assert_eq!(sniff_image_type(b"GIF89a"), Some("image/gif"));
        assert_eq!(sniff_image_type(b"RIFF\x00\x00\x00\x00WEBPVP8 "), Some("image/webp"));
        assert_eq!(sniff_image_type(b"<html>"), None);
        assert_eq!(sniff_image_type(&[]), None);
    }

    #[test]
    fn content_type_parameters_are_dropped() {
        let image = FetchedImage::new(PNG_HEADER.to_vec(), "Image/PNG; charset=binary");
        assert_eq!(image.content_type, "image/png");
        assert!(image.warnings.is_empty());
    }

    #[test]
    fn unexpected_content_type_warns_but_sniffs() {
        let image = FetchedImage::new(PNG_HEADER.to_vec(), "application/octet-stream");
        assert_eq!(
            image.warnings,
            vec!["Unexpected content type: application/octet-stream"]
        );
        assert!(!image.declared_image());
        assert_eq!(image.mime_type().as_deref(), Some("image/png"));
    }

    #[test]
    fn html_page_is_not_an_image() {
        let image = FetchedImage::new(b"<html></html>".to_vec(), "text/html");
        assert_eq!(image.mime_type(), None);
    }

    #[test]
    fn declared_type_used_when_bytes_unknown() {
        let image = FetchedImage::new(vec![0, 1, 2, 3], "image/avif");
        assert_eq!(image.mime_type().as_deref(), Some("image/avif"));
    }
}
