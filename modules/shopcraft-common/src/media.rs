use std::fmt;

use serde::{Deserialize, Serialize};

pub const IMAGE_DIMENSION_MIN: u32 = 64;
pub const IMAGE_DIMENSION_MAX: u32 = 1536;
pub const IMAGE_DIMENSION_STEP: u32 = 64;

pub const VIDEO_DURATION_MIN: u32 = 2;
pub const VIDEO_DURATION_MAX: u32 = 10;

/// Round down to a multiple of 64 and clamp into the range the image engine accepts.
pub fn clamp_image_dimension(value: u32) -> u32 {
    ((value / IMAGE_DIMENSION_STEP) * IMAGE_DIMENSION_STEP)
        .clamp(IMAGE_DIMENSION_MIN, IMAGE_DIMENSION_MAX)
}

pub fn clamp_video_duration(seconds: u32) -> u32 {
    seconds.clamp(VIDEO_DURATION_MIN, VIDEO_DURATION_MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "16:9")]
    Landscape,
    #[serde(rename = "9:16")]
    Portrait,
    #[serde(rename = "1:1")]
    Square,
}

impl AspectRatio {
    /// Unknown ratios fall back to 16:9.
    pub fn parse_or_default(value: &str) -> Self {
        match value.trim() {
            "9:16" => AspectRatio::Portrait,
            "1:1" => AspectRatio::Square,
            _ => AspectRatio::Landscape,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Landscape => "16:9",
            AspectRatio::Portrait => "9:16",
            AspectRatio::Square => "1:1",
        }
    }

    pub fn resolution(&self) -> &'static str {
        match self {
            AspectRatio::Landscape => "1920x1080",
            AspectRatio::Portrait => "1080x1920",
            AspectRatio::Square => "1080x1080",
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File size in megabytes, rounded to two places, e.g. `"1.25 MB"`.
pub fn format_file_size(bytes: u64) -> String {
    let mb = bytes as f64 / (1024.0 * 1024.0);
    format!("{} MB", (mb * 100.0).round() / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_dimensions_snap_to_grid() {
        assert_eq!(clamp_image_dimension(1024), 1024);
        assert_eq!(clamp_image_dimension(1000), 960);
        assert_eq!(clamp_image_dimension(10), 64);
        assert_eq!(clamp_image_dimension(0), 64);
        assert_eq!(clamp_image_dimension(4096), 1536);
    }

    #[test]
    fn video_duration_clamped() {
        assert_eq!(clamp_video_duration(0), 2);
        assert_eq!(clamp_video_duration(4), 4);
        assert_eq!(clamp_video_duration(30), 10);
    }

    #[test]
    fn aspect_ratio_parsing() {
        assert_eq!(AspectRatio::parse_or_default("9:16"), AspectRatio::Portrait);
        assert_eq!(AspectRatio::parse_or_default("1:1"), AspectRatio::Square);
        assert_eq!(AspectRatio::parse_or_default("4:3"), AspectRatio::Landscape);
        assert_eq!(AspectRatio::Portrait.resolution(), "1080x1920");
        assert_eq!(serde_json::to_string(&AspectRatio::Square).unwrap(), "\"1:1\"");
    }

    #[test]
    fn file_size_in_megabytes() {
        assert_eq!(format_file_size(0), "0 MB");
        assert_eq!(format_file_size(1024 * 1024), "1 MB");
        assert_eq!(format_file_size(1_310_720), "1.25 MB");
    }
}
