//! Ambient light plus two point lights.

use glam::Vec3;

use crate::{options::LightingOptions, util::color::srgb_to_linear};

/// Lighting uniform. Must match `duplex::lighting::LightingUniform`.
///
/// WGSL layout:
///   ambient: vec3<f32>            (offset 0)
///   specular_intensity: f32       (offset 12)
///   light1_position: vec3<f32>    (offset 16)
///   shininess: f32                (offset 28)
///   light1_color: vec3<f32>       (offset 32)
///   rim_power: f32                (offset 44)
///   light2_position: vec3<f32>    (offset 48)
///   rim_intensity: f32            (offset 60)
///   light2_color: vec3<f32>       (offset 64)
///   _pad: f32                     (offset 76)
///   Total: 80 bytes
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniform {
    /// Linear ambient color premultiplied by its intensity.
    pub ambient: [f32; 3],
    /// Blinn-Phong specular strength.
    pub specular_intensity: f32,
    /// World-space position of point light 1.
    pub light1_position: [f32; 3],
    /// Specular exponent.
    pub shininess: f32,
    /// Linear color of light 1 premultiplied by its intensity.
    pub light1_color: [f32; 3],
    /// Rim falloff exponent.
    pub rim_power: f32,
    /// World-space position of point light 2.
    pub light2_position: [f32; 3],
    /// Rim brightness.
    pub rim_intensity: f32,
    /// Linear color of light 2 premultiplied by its intensity.
    pub light2_color: [f32; 3],
    /// Padding to 16-byte struct alignment.
    pub _pad: f32,
}

fn scaled(color: [f32; 3], intensity: f32) -> [f32; 3] {
    (Vec3::from(srgb_to_linear(color)) * intensity).to_array()
}

impl LightingUniform {
    /// Build from user-facing options (sRGB colors, separate intensities).
    #[must_use]
    pub fn from_options(options: &LightingOptions) -> Self {
        Self {
            ambient: scaled(options.ambient_color, options.ambient_intensity),
            specular_intensity: options.specular_intensity,
            light1_position: options.light1_position,
            shininess: options.shininess,
            light1_color: scaled(options.light1_color, options.light1_intensity),
            rim_power: options.rim_power,
            light2_position: options.light2_position,
            rim_intensity: options.rim_intensity,
            light2_color: scaled(options.light2_color, options.light2_intensity),
            _pad: 0.0,
        }
    }
}

impl Default for LightingUniform {
    fn default() -> Self {
        Self::from_options(&LightingOptions::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_80_bytes() {
        assert_eq!(size_of::<LightingUniform>(), 80);
    }

    #[test]
    fn intensities_scale_colors() {
        let uniform = LightingUniform::default();
        // White key light at 1.0, violet fill at half strength.
        for c in uniform.light1_color {
            assert!((c - 1.0).abs() < 1e-5);
        }
        assert_eq!(uniform.light1_position, [10.0, 10.0, 10.0]);
        assert_eq!(uniform.light2_position, [-10.0, -10.0, -5.0]);
        let fill = Vec3::from(uniform.light2_color);
        assert!(fill.max_element() <= 0.5 + 1e-6);

        let ambient = Vec3::from(uniform.ambient);
        assert!(ambient.max_element() <= 0.4 + 1e-6);
        assert!(ambient.min_element() > 0.0);
    }
}
