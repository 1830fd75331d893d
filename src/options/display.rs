use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Display", inline)]
#[serde(default)]
/// Surface and presentation settings.
pub struct DisplayOptions {
    /// Clear to alpha 0 so whatever is behind the window shows through.
    #[schemars(title = "Transparent Background")]
    pub transparent_background: bool,
    /// Clear color when the background is opaque (or transparency is not
    /// supported by the surface).
    #[schemars(skip)]
    pub background: [f32; 3],
    /// Multisample count: 1 (off) or 4.
    #[schemars(skip)]
    pub msaa_samples: u32,
    /// Frame limiter (0 = unlimited).
    #[schemars(skip)]
    pub target_fps: u32,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            transparent_background: true,
            background: [0.02, 0.03, 0.08],
            msaa_samples: 4,
            target_fps: 0,
        }
    }
}

impl DisplayOptions {
    /// MSAA count clamped to what every wgpu backend guarantees.
    #[must_use]
    pub fn sample_count(&self) -> u32 {
        if self.msaa_samples >= 4 {
            4
        } else {
            1
        }
    }
}
