pub mod brief;
pub mod config;
pub mod error;
pub mod media;
pub mod strategy;
pub mod types;
pub mod video;

pub use brief::{clean, enhance, score};
pub use config::AppConfig;
pub use error::ShopcraftError;
pub use strategy::{normalize, normalize_with_outcome, Normalized};
pub use types::*;
pub use video::{normalize_video_enhancement, EnhancementKind, VideoConcept, VideoEnhancement};
