use std::f32::consts::FRAC_PI_4;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection and orbit-control parameters.
pub struct CameraOptions {
    /// Initial eye position.
    #[schemars(skip)]
    pub position: [f32; 3],
    /// Orbit target.
    #[schemars(skip)]
    pub target: [f32; 3],
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 90.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Smallest polar angle from +Y, in radians.
    #[schemars(skip)]
    pub min_polar: f32,
    /// Largest polar angle from +Y, in radians.
    #[schemars(skip)]
    pub max_polar: f32,
    /// Closest allowed zoom distance.
    #[schemars(title = "Min Distance", range(min = 0.5, max = 50.0), extend("step" = 0.5))]
    pub min_distance: f32,
    /// Farthest allowed zoom distance.
    #[schemars(title = "Max Distance", range(min = 1.0, max = 100.0), extend("step" = 0.5))]
    pub max_distance: f32,
    /// Slowly orbit the target when idle.
    #[schemars(title = "Auto Rotate")]
    pub auto_rotate: bool,
    /// Auto-rotation speed; 1.0 is one orbit per minute.
    #[schemars(title = "Auto Rotate Speed", range(min = 0.0, max = 5.0), extend("step" = 0.1))]
    pub auto_rotate_speed: f32,
    /// Keep drag momentum and let it decay.
    #[schemars(skip)]
    pub enable_damping: bool,
    /// Fraction of drag momentum removed per update.
    #[schemars(skip)]
    pub damping_factor: f32,
    /// Rotation sensitivity multiplier.
    #[schemars(title = "Rotate Speed", range(min = 0.1, max = 2.0), extend("step" = 0.05))]
    pub rotate_speed: f32,
    /// Zoom sensitivity multiplier.
    #[schemars(title = "Zoom Speed", range(min = 0.1, max = 2.0), extend("step" = 0.05))]
    pub zoom_speed: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 8.0],
            target: [0.0, 0.0, 0.0],
            fovy: 45.0,
            znear: 0.1,
            zfar: 100.0,
            min_polar: FRAC_PI_4,
            max_polar: 3.0 * FRAC_PI_4,
            min_distance: 5.0,
            max_distance: 15.0,
            auto_rotate: true,
            auto_rotate_speed: 0.5,
            enable_damping: true,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
        }
    }
}
