use shopcraft_common::media::AspectRatio;

/// Instructions for turning product lines (text and/or image) into a strategy.
pub fn strategy_prompt(product_lines: &[String]) -> String {
    format!(
        r##"You are writing listing content for one specific product. Use only what the product information below shows; do not invent features.

{lines}

Answer with a single JSON object and nothing else, using exactly these keys:
{{
  "title": "The product's real name or type",
  "description": "What this product is, its actual features and benefits",
  "slogan": "A short slogan tied to this particular product",
  "hashtags": ["#relevant", "#product", "#hashtags"],
  "image_description": "How to photograph this product: its appearance, colors, materials and setting",
  "video_description": "Scenes showing this product being used or demonstrated where it belongs"
}}

Keep every value factual and specific. Avoid generic marketing phrases."##,
        lines = product_lines.join("\n"),
    )
}

pub const VISION_PROMPT: &str = "Describe the product shown in this image so a copywriter can market it. \
Cover the product type and category, its key features, colors, materials and design, \
any visible branding, its apparent condition and quality, and anything that sets it apart. \
Reply with a short plain-text description.";

/// Instructions for expanding a short video idea into a shot-level concept.
pub fn video_prompt(description: &str, duration_seconds: u32, aspect_ratio: AspectRatio) -> String {
    format!(
        r#"Act as a commercial video director. Expand the idea below into a precise prompt for a video generator.

Idea: "{description}"
Length: {duration_seconds} seconds
Aspect ratio: {ratio}

Answer with a single JSON object and nothing else:
{{
  "enhanced_prompt": "Detailed generation prompt, at most 500 characters",
  "video_concept": {{
    "visual_style": "Overall look, e.g. cinematic or studio product shot",
    "scenes": ["Timed scene 1", "Timed scene 2", "Timed scene 3"],
    "camera_movements": ["Camera move 1", "Camera move 2"],
    "lighting": "Lighting setup",
    "colors": "Palette and mood",
    "audio_suggestions": "Music or sound style",
    "technical_notes": "Notes for a {ratio} frame"
  }}
}}

Fit the scene timings inside {duration_seconds} seconds."#,
        ratio = aspect_ratio.as_str(),
    )
}
