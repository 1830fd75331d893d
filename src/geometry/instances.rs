//! Instance placer for rungs and junction nodes.
//!
//! Each instance is a translation/rotation/scale applied to a shared
//! prototype mesh (see [`super::primitives`]).

use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Mat3, Mat4, Quat, Vec3};

use super::curve::helix_point;
use crate::options::HelixOptions;

/// Placement of one prototype instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstanceTransform {
    /// World-space offset of the prototype origin.
    pub translation: Vec3,
    /// Orientation.
    pub rotation: Quat,
    /// Per-axis scale, applied before rotation.
    pub scale: Vec3,
}

impl Default for InstanceTransform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl InstanceTransform {
    /// Identity rotation and scale at `translation`.
    #[must_use]
    pub fn at(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::default()
        }
    }

    /// Composed model matrix `T * R * S`.
    #[must_use]
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            self.scale,
            self.rotation,
            self.translation,
        )
    }

    /// Inverse-transpose of the upper 3x3, for transforming normals under
    /// non-uniform scale.
    #[must_use]
    pub fn normal_matrix(&self) -> Mat3 {
        Mat3::from_mat4(self.to_matrix()).inverse().transpose()
    }

    /// Map a prototype-space point through this transform.
    #[must_use]
    pub fn apply(&self, point: Vec3) -> Vec3 {
        self.to_matrix().transform_point3(point)
    }
}

/// Endpoints of rung `i`: strand A's point and its diametric partner.
///
/// Rungs always pair phase 0 with phase π, independent of the strands'
/// actual phases.
#[must_use]
pub fn rung_endpoints(params: &HelixOptions, i: u32) -> (Vec3, Vec3) {
    let step = i as f32;
    (helix_point(params, step, 0.0), helix_point(params, step, PI))
}

/// Rotation taking +Z onto `dir`, keeping +Y as close to up as possible.
fn look_rotation(dir: Vec3) -> Quat {
    let z = dir.normalize_or_zero();
    let mut x = Vec3::Y.cross(z);
    if x.length_squared() < 1e-12 {
        // dir is vertical; any horizontal axis works.
        x = Vec3::X;
    }
    let x = x.normalize();
    let y = z.cross(x);
    Quat::from_mat3(&Mat3::from_cols(x, y, z))
}

/// One transform per base pair, mapping the unit cylinder onto the chord
/// between the two strands.
#[must_use]
pub fn rung_transforms(params: &HelixOptions) -> Vec<InstanceTransform> {
    let length = 2.0 * params.radius;
    (0..params.base_pairs)
        .map(|i| {
            let (a, b) = rung_endpoints(params, i);
            let center = (a + b) * 0.5;
            // Prototype axis is +Y; tilt it onto +Z, then aim +Z at B.
            let rotation =
                look_rotation(b - center) * Quat::from_rotation_x(FRAC_PI_2);
            InstanceTransform {
                translation: center,
                rotation,
                scale: Vec3::new(1.0, length / 2.0, 1.0),
            }
        })
        .collect()
}

/// One transform per base pair, placing a node sphere on the strand at
/// `phase`.
#[must_use]
pub fn junction_transforms(
    params: &HelixOptions,
    phase: f32,
) -> Vec<InstanceTransform> {
    (0..params.base_pairs)
        .map(|i| InstanceTransform::at(helix_point(params, i as f32, phase)))
        .collect()
}
