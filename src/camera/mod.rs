//! Camera system: perspective projection and orbit controls.

/// Orbit camera with its GPU uniform.
pub mod controller;
/// Core camera struct and GPU uniform type.
pub mod core;
/// Spherical orbit math with limits, auto-rotation, and damping.
pub mod orbit;
