//! Strand centerline construction.
//!
//! A strand is sampled at a quarter of the base-pair step (`4N + 1` control
//! points) and interpolated with a [`CatmullRom`] spline. Strand B is the
//! same curve at a phase of π, i.e. mirrored through the helix axis.

use std::f32::consts::PI;

use glam::Vec3;

use super::spline::{
    arc_fraction_to_param, CatmullRom, SplinePoint, ARC_LENGTH_DIVISIONS,
};
use crate::options::HelixOptions;

/// Control points per base-pair step.
pub const SAMPLES_PER_STEP: u32 = 4;

/// Angular phase of one of the two strands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strand {
    /// Phase 0.
    A,
    /// Phase π.
    B,
}

impl Strand {
    /// Both strands, A first.
    pub const BOTH: [Self; 2] = [Self::A, Self::B];

    /// Angular phase offset in radians.
    #[must_use]
    pub fn phase(self) -> f32 {
        match self {
            Self::A => 0.0,
            Self::B => PI,
        }
    }

    /// Index into per-strand arrays.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
        }
    }
}

/// Point on the analytic helix at (possibly fractional) base-pair `step`.
///
/// Both control points and junction nodes go through this function, so a
/// node at integer step `i` is bit-identical to control point `4i`.
#[must_use]
pub fn helix_point(params: &HelixOptions, step: f32, phase: f32) -> Vec3 {
    let angle = step * params.twist_per_step + phase;
    let y = step * params.vertical_step - params.height() / 2.0;
    Vec3::new(params.radius * angle.cos(), y, params.radius * angle.sin())
}

/// The `4N + 1` control points of one strand.
#[must_use]
pub fn control_points(params: &HelixOptions, phase: f32) -> Vec<Vec3> {
    let count = params.base_pairs * SAMPLES_PER_STEP;
    (0..=count)
        .map(|i| {
            helix_point(params, i as f32 / SAMPLES_PER_STEP as f32, phase)
        })
        .collect()
}

/// Smooth interpolating curve through a strand's control points, with an
/// arc-length table for uniform sampling.
#[derive(Debug, Clone)]
pub struct SpatialCurve {
    spline: CatmullRom,
    lengths: Vec<f32>,
}

impl SpatialCurve {
    /// Interpolate `points` with the given spline.
    #[must_use]
    pub fn new(spline: CatmullRom) -> Self {
        let lengths = spline.arc_lengths(ARC_LENGTH_DIVISIONS);
        Self { spline, lengths }
    }

    /// Control points the curve passes through.
    #[must_use]
    pub fn control_points(&self) -> &[Vec3] {
        self.spline.points()
    }

    /// Point at spline parameter `t` in `[0, 1]`.
    #[must_use]
    pub fn point(&self, t: f32) -> Vec3 {
        self.spline.point(t)
    }

    /// Point at arc-length fraction `u` in `[0, 1]`.
    #[must_use]
    pub fn point_at(&self, u: f32) -> Vec3 {
        self.spline.point(arc_fraction_to_param(&self.lengths, u))
    }

    /// Unit tangent at arc-length fraction `u`.
    #[must_use]
    pub fn tangent_at(&self, u: f32) -> Vec3 {
        self.spline.tangent(arc_fraction_to_param(&self.lengths, u))
    }

    /// Approximate total length.
    #[must_use]
    pub fn length(&self) -> f32 {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    /// `segments + 1` points evenly spaced by arc length, with tangents.
    /// Normals and binormals are left zeroed for the frame pass.
    #[must_use]
    pub fn sample_uniform(&self, segments: u32) -> Vec<SplinePoint> {
        let segments = segments.max(1);
        (0..=segments)
            .map(|i| {
                let u = i as f32 / segments as f32;
                let t = arc_fraction_to_param(&self.lengths, u);
                SplinePoint {
                    pos: self.spline.point(t),
                    tangent: self.spline.tangent(t),
                    normal: Vec3::ZERO,
                    binormal: Vec3::ZERO,
                }
            })
            .collect()
    }
}

/// Build the centerline of the strand at `phase`.
#[must_use]
pub fn build_curve(params: &HelixOptions, phase: f32) -> SpatialCurve {
    let spline = CatmullRom::new(
        control_points(params, phase),
        params.spline,
        params.tension,
    );
    SpatialCurve::new(spline)
}
