//! Request orchestration: seller input in, marketing content and media out.
//!
//! Each stage returns `Result<_, ShopcraftError>`; the REST layer decides how
//! a failure is reported. Model output always passes through the total
//! normalizers in `shopcraft_common`, so a bad model answer degrades to
//! fallback content rather than an error.

pub mod media;
pub mod product;
pub mod seller;

use ai_client::AiError;
use shopcraft_common::ShopcraftError;

pub use media::{generate_image, generate_video, ImageGeneration, VideoGeneration};
pub use product::{process_product, ProductOutcome, ProductResponse, StrategySource};
pub use seller::{process_image, process_text, ImageResponse, TextResponse};

/// Map a provider failure onto the pipeline's error categories.
pub(crate) fn upstream(context: &str, err: AiError) -> ShopcraftError {
    if err.is_timeout() {
        return ShopcraftError::Timeout(format!("{context}: {err}"));
    }
    match err {
        AiError::Config(message) => ShopcraftError::Config(message),
        other => ShopcraftError::Upstream(format!("{context}: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeouts_keep_their_category() {
        let err = upstream("Strategy generation failed", AiError::Timeout("30s".into()));
        assert!(matches!(err, ShopcraftError::Timeout(_)));
    }

    #[test]
    fn api_errors_are_upstream() {
        let err = upstream(
            "Strategy generation failed",
            AiError::Api {
                status: 429,
                message: "quota".into(),
            },
        );
        assert_eq!(
            err.message(),
            "Strategy generation failed: API error (429): quota"
        );
    }
}
