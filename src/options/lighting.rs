use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Lighting", inline)]
#[serde(default)]
/// Ambient light, two point lights, and the shared surface response.
pub struct LightingOptions {
    /// Ambient light color.
    #[schemars(skip)]
    pub ambient_color: [f32; 3],
    /// Ambient light intensity.
    #[schemars(title = "Ambient", range(min = 0.0, max = 1.5), extend("step" = 0.01))]
    pub ambient_intensity: f32,
    /// World-space position of the key light.
    #[schemars(skip)]
    pub light1_position: [f32; 3],
    /// Key light color.
    #[schemars(skip)]
    pub light1_color: [f32; 3],
    /// Key light intensity.
    #[schemars(title = "Key Light", range(min = 0.0, max = 3.0), extend("step" = 0.05))]
    pub light1_intensity: f32,
    /// World-space position of the fill light.
    #[schemars(skip)]
    pub light2_position: [f32; 3],
    /// Fill light color.
    #[schemars(skip)]
    pub light2_color: [f32; 3],
    /// Fill light intensity.
    #[schemars(title = "Fill Light", range(min = 0.0, max = 3.0), extend("step" = 0.05))]
    pub light2_intensity: f32,
    /// Blinn-Phong specular strength.
    #[schemars(skip)]
    pub specular_intensity: f32,
    /// Blinn-Phong exponent.
    #[schemars(skip)]
    pub shininess: f32,
    #[schemars(title = "Rim Power", range(min = 0.5, max = 10.0), extend("step" = 0.1))]
    /// Rim falloff exponent.
    pub rim_power: f32,
    #[schemars(title = "Rim Intensity", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    /// Rim brightness.
    pub rim_intensity: f32,
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            ambient_color: [1.0, 1.0, 1.0],
            ambient_intensity: 0.4,
            light1_position: [10.0, 10.0, 10.0],
            light1_color: [1.0, 1.0, 1.0],
            light1_intensity: 1.0,
            light2_position: [-10.0, -10.0, -5.0],
            light2_color: [0.48, 0.38, 1.0],
            light2_intensity: 0.5,
            specular_intensity: 0.45,
            shininess: 48.0,
            rim_power: 3.0,
            rim_intensity: 0.25,
        }
    }
}
