//! Orbit controls: spherical camera motion around a fixed target.
//!
//! Drag rotates, wheel zooms, pan is not supported. The polar angle and the
//! distance are clamped after every update. Auto-rotation spins the azimuth
//! at a constant rate while the user is not dragging.

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use super::core::Camera;
use crate::options::CameraOptions;

/// Keeps the polar angle off the poles so `look_at` stays defined.
const POLE_EPSILON: f32 = 1e-6;

/// Wheel dolly factor per unit of scroll at zoom speed 1.
const ZOOM_BASE: f32 = 0.95;

/// Spherical orbit state and its limits.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitController {
    target: Vec3,
    /// Angle around +Y, measured from +Z toward +X.
    azimuth: f32,
    /// Angle from +Y.
    polar: f32,
    distance: f32,

    azimuth_velocity: f32,
    polar_velocity: f32,
    dragging: bool,
    viewport_height: f32,

    min_polar: f32,
    max_polar: f32,
    min_distance: f32,
    max_distance: f32,
    auto_rotate: bool,
    auto_rotate_speed: f32,
    enable_damping: bool,
    damping_factor: f32,
    rotate_speed: f32,
    zoom_speed: f32,
}

impl OrbitController {
    /// Start from the camera position and limits in `options`.
    #[must_use]
    pub fn new(options: &CameraOptions) -> Self {
        let target = Vec3::from(options.target);
        let offset = Vec3::from(options.position) - target;
        let distance = offset.length();
        let (azimuth, polar) = if distance > 0.0 {
            (
                offset.x.atan2(offset.z),
                (offset.y / distance).clamp(-1.0, 1.0).acos(),
            )
        } else {
            (0.0, PI / 2.0)
        };

        let mut controller = Self {
            target,
            azimuth,
            polar,
            distance,
            azimuth_velocity: 0.0,
            polar_velocity: 0.0,
            dragging: false,
            viewport_height: 1.0,
            min_polar: 0.0,
            max_polar: PI,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            auto_rotate: false,
            auto_rotate_speed: 0.0,
            enable_damping: false,
            damping_factor: 0.0,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
        };
        controller.apply_options(options);
        controller
    }

    /// Adopt new limits and speeds, keeping the current orientation.
    pub fn apply_options(&mut self, options: &CameraOptions) {
        self.min_polar = options.min_polar.min(options.max_polar);
        self.max_polar = options.max_polar.max(options.min_polar);
        self.min_distance = options.min_distance.min(options.max_distance);
        self.max_distance = options.max_distance.max(options.min_distance);
        self.auto_rotate = options.auto_rotate;
        self.auto_rotate_speed = options.auto_rotate_speed;
        self.enable_damping = options.enable_damping;
        self.damping_factor = options.damping_factor.clamp(0.0, 1.0);
        self.rotate_speed = options.rotate_speed;
        self.zoom_speed = options.zoom_speed;
        self.clamp();
    }

    /// Height in pixels that a full-height drag maps to one turn.
    pub fn set_viewport_height(&mut self, height: f32) {
        self.viewport_height = height.max(1.0);
    }

    /// Mark the start or end of a user drag. Auto-rotation pauses while
    /// dragging.
    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    /// Queue a rotation from a cursor delta in pixels.
    pub fn rotate(&mut self, delta: Vec2) {
        let scale = TAU / self.viewport_height * self.rotate_speed;
        self.azimuth_velocity -= delta.x * scale;
        self.polar_velocity -= delta.y * scale;
        if !self.enable_damping {
            self.integrate_rotation(1.0);
        }
    }

    /// Dolly toward (positive `delta`) or away from the target.
    pub fn zoom(&mut self, delta: f32) {
        let scale = ZOOM_BASE.powf(self.zoom_speed * delta.abs());
        if delta > 0.0 {
            self.distance *= scale;
        } else if delta < 0.0 {
            self.distance /= scale;
        }
        self.clamp();
    }

    /// Auto-rotation rate in radians per second.
    #[must_use]
    pub fn auto_rotate_rate(&self) -> f32 {
        TAU / 60.0 * self.auto_rotate_speed
    }

    /// Advance by `dt` seconds: auto-rotate, apply damped velocity, clamp.
    pub fn update(&mut self, dt: f32) {
        if self.auto_rotate && !self.dragging {
            self.azimuth -= self.auto_rotate_rate() * dt;
        }
        if self.enable_damping {
            self.integrate_rotation(self.damping_factor);
        }
        self.clamp();
        self.azimuth = self.azimuth.rem_euclid(TAU);
    }

    fn integrate_rotation(&mut self, factor: f32) {
        self.azimuth += self.azimuth_velocity * factor;
        self.polar += self.polar_velocity * factor;
        self.azimuth_velocity *= 1.0 - factor;
        self.polar_velocity *= 1.0 - factor;
        self.clamp();
    }

    fn clamp(&mut self) {
        let lo = self.min_polar.max(POLE_EPSILON);
        let hi = self.max_polar.min(PI - POLE_EPSILON);
        self.polar = self.polar.clamp(lo, hi.max(lo));
        self.distance = self.distance.clamp(self.min_distance, self.max_distance);
    }

    /// Current azimuth in radians.
    #[must_use]
    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }

    /// Current polar angle in radians.
    #[must_use]
    pub fn polar(&self) -> f32 {
        self.polar
    }

    /// Current distance from the target.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Eye position implied by the spherical state.
    #[must_use]
    pub fn eye(&self) -> Vec3 {
        let (sin_polar, cos_polar) = self.polar.sin_cos();
        let (sin_az, cos_az) = self.azimuth.sin_cos();
        self.target
            + self.distance
                * Vec3::new(sin_polar * sin_az, cos_polar, sin_polar * cos_az)
    }

    /// Write eye and target into `camera`.
    pub fn apply_to(&self, camera: &mut Camera) {
        camera.eye = self.eye();
        camera.target = self.target;
        camera.up = Vec3::Y;
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_4;

    use super::*;

    fn still() -> CameraOptions {
        CameraOptions {
            auto_rotate: false,
            enable_damping: false,
            ..CameraOptions::default()
        }
    }

    #[test]
    fn starts_at_configured_position() {
        let orbit = OrbitController::new(&CameraOptions::default());
        assert!((orbit.distance() - 8.0).abs() < 1e-6);
        assert!((orbit.polar() - PI / 2.0).abs() < 1e-6);
        assert!(orbit.eye().distance(Vec3::new(0.0, 0.0, 8.0)) < 1e-5);
    }

    #[test]
    fn polar_angle_is_clamped() {
        let mut orbit = OrbitController::new(&still());
        orbit.set_viewport_height(600.0);
        orbit.rotate(Vec2::new(0.0, 5000.0));
        assert!((orbit.polar() - FRAC_PI_4).abs() < 1e-6);
        orbit.rotate(Vec2::new(0.0, -10_000.0));
        assert!((orbit.polar() - 3.0 * FRAC_PI_4).abs() < 1e-6);
    }

    #[test]
    fn distance_is_clamped() {
        let mut orbit = OrbitController::new(&still());
        for _ in 0..200 {
            orbit.zoom(1.0);
        }
        assert_eq!(orbit.distance(), 5.0);
        for _ in 0..200 {
            orbit.zoom(-1.0);
        }
        assert_eq!(orbit.distance(), 15.0);
    }

    #[test]
    fn out_of_range_start_is_pulled_in() {
        let options = CameraOptions {
            position: [0.0, 30.0, 0.1],
            ..still()
        };
        let orbit = OrbitController::new(&options);
        assert_eq!(orbit.distance(), 15.0);
        assert!((orbit.polar() - FRAC_PI_4).abs() < 1e-6);
    }

    #[test]
    fn auto_rotate_rate_matches_speed() {
        let options = CameraOptions {
            enable_damping: false,
            ..CameraOptions::default()
        };
        let mut orbit = OrbitController::new(&options);
        let expected = TAU / 60.0 * 0.5;
        assert!((orbit.auto_rotate_rate() - expected).abs() < 1e-7);

        let before = orbit.azimuth();
        orbit.update(1.0);
        let moved = (before - orbit.azimuth()).rem_euclid(TAU);
        assert!((moved - expected).abs() < 1e-5);
    }

    #[test]
    fn auto_rotate_pauses_while_dragging() {
        let mut orbit = OrbitController::new(&CameraOptions::default());
        orbit.set_dragging(true);
        let before = orbit.azimuth();
        orbit.update(1.0);
        assert_eq!(orbit.azimuth(), before.rem_euclid(TAU));
        orbit.set_dragging(false);
        orbit.update(1.0);
        assert_ne!(orbit.azimuth(), before);
    }

    #[test]
    fn damping_spreads_a_drag_over_frames() {
        let options = CameraOptions {
            auto_rotate: false,
            ..CameraOptions::default()
        };
        let mut orbit = OrbitController::new(&options);
        orbit.set_viewport_height(100.0);
        orbit.rotate(Vec2::new(-1.0, 0.0));
        let total = TAU / 100.0;

        orbit.update(1.0 / 60.0);
        let first_step = orbit.azimuth();
        assert!((first_step - total * 0.05).abs() < 1e-6);

        for _ in 0..600 {
            orbit.update(1.0 / 60.0);
        }
        assert!((orbit.azimuth() - total).abs() < 1e-4);
    }

    #[test]
    fn eye_stays_on_sphere() {
        let mut orbit = OrbitController::new(&still());
        orbit.set_viewport_height(400.0);
        orbit.rotate(Vec2::new(123.0, -45.0));
        orbit.update(0.016);
        assert!((orbit.eye().length() - orbit.distance()).abs() < 1e-4);

        let mut camera = Camera::from_options(&CameraOptions::default(), 1.0);
        orbit.apply_to(&mut camera);
        assert_eq!(camera.eye, orbit.eye());
    }
}
