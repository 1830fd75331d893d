use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Time-driven motion of the whole helix group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Motion", inline)]
#[serde(default)]
pub struct MotionOptions {
    /// Spin around the vertical axis, radians per second.
    #[schemars(title = "Spin", range(min = 0.0, max = 2.0), extend("step" = 0.01))]
    pub spin_rate: f32,
    /// Angular frequency of the vertical bob, radians per second.
    #[schemars(title = "Bob Frequency", range(min = 0.0, max = 4.0), extend("step" = 0.05))]
    pub bob_frequency: f32,
    /// Peak vertical displacement of the bob.
    #[schemars(title = "Bob Amplitude", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub bob_amplitude: f32,
}

impl Default for MotionOptions {
    fn default() -> Self {
        Self {
            spin_rate: 0.15,
            bob_frequency: 0.5,
            bob_amplitude: 0.15,
        }
    }
}
