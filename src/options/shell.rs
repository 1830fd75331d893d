use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Text and look of the page shell drawn over the scene.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Page Shell", inline)]
#[serde(default)]
pub struct ShellOptions {
    /// Overlay heading.
    #[schemars(title = "Heading")]
    pub heading: String,
    /// Overlay subtitle below the heading.
    #[schemars(title = "Subtitle")]
    pub subtitle: String,
    /// CSS font stack for both lines.
    #[schemars(skip)]
    pub font_family: String,
    /// Heading font size in CSS pixels.
    #[schemars(skip)]
    pub heading_size_px: u32,
    /// Subtitle font size in CSS pixels.
    #[schemars(skip)]
    pub subtitle_size_px: u32,
    /// Heading text color.
    #[schemars(skip)]
    pub heading_color: [f32; 3],
    /// Subtitle text color.
    #[schemars(skip)]
    pub subtitle_color: [f32; 3],
    /// Placeholder bar width in CSS pixels.
    #[schemars(skip)]
    pub placeholder_width_px: u32,
    /// Placeholder bar height in CSS pixels.
    #[schemars(skip)]
    pub placeholder_height_px: u32,
    /// Resting color of the placeholder bar.
    #[schemars(skip)]
    pub placeholder_base: [f32; 3],
    /// Color of the moving shimmer highlight.
    #[schemars(skip)]
    pub placeholder_highlight: [f32; 3],
    /// Duration of one shimmer sweep in seconds.
    #[schemars(skip)]
    pub shimmer_period_secs: f32,
}

impl Default for ShellOptions {
    fn default() -> Self {
        Self {
            heading: "Decode the building blocks of life".to_owned(),
            subtitle: "Genomic insight, rendered in real time".to_owned(),
            font_family: "Inter, system-ui, -apple-system, sans-serif"
                .to_owned(),
            heading_size_px: 48,
            subtitle_size_px: 18,
            heading_color: [1.0, 1.0, 1.0],
            subtitle_color: [0.72, 0.78, 0.9],
            placeholder_width_px: 240,
            placeholder_height_px: 12,
            placeholder_base: [0.12, 0.14, 0.22],
            placeholder_highlight: [0.28, 0.32, 0.48],
            shimmer_period_secs: 1.5,
        }
    }
}
