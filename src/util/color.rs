//! Color-space helpers. Options carry sRGB colors; shaders light in
//! linear space and the sRGB surface encodes on write.

/// Convert one sRGB channel in `[0, 1]` to linear.
#[must_use]
pub fn srgb_channel_to_linear(c: f32) -> f32 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Convert an sRGB triple to linear.
#[must_use]
pub fn srgb_to_linear(rgb: [f32; 3]) -> [f32; 3] {
    rgb.map(srgb_channel_to_linear)
}

/// Convert an sRGB triple to linear RGBA with straight alpha.
#[must_use]
pub fn srgb_to_linear_rgba(rgb: [f32; 3], alpha: f32) -> [f32; 4] {
    let [r, g, b] = srgb_to_linear(rgb);
    [r, g, b, alpha]
}
