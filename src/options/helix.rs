use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How the backbone spline is parameterized between control points.
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Hash,
    Default,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum SplineKind {
    /// Knot spacing by the square root of chord length. No cusps or
    /// self-intersections within a span.
    #[default]
    Centripetal,
    /// Knot spacing by chord length.
    Chordal,
    /// Uniform knots with an explicit tension.
    Uniform,
}

/// Shape parameters of the double helix.
///
/// These are fixed for the lifetime of a built assembly. Changing any of
/// them produces a new assembly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Helix", inline)]
#[serde(default)]
pub struct HelixOptions {
    /// Number of base pairs (rungs, and junction nodes per strand).
    #[schemars(title = "Base Pairs", range(min = 2, max = 200), extend("step" = 1))]
    pub base_pairs: u32,
    /// Vertical distance between consecutive base pairs.
    #[schemars(title = "Rise", range(min = 0.05, max = 2.0), extend("step" = 0.01))]
    pub vertical_step: f32,
    /// Distance from the helix axis to each backbone.
    #[schemars(title = "Radius", range(min = 0.1, max = 5.0), extend("step" = 0.05))]
    pub radius: f32,
    /// Rotation around the axis per base pair, in radians.
    #[schemars(title = "Twist", range(min = 0.05, max = 1.5), extend("step" = 0.01))]
    pub twist_per_step: f32,
    /// Backbone tube cross-section radius.
    #[schemars(title = "Backbone Radius", range(min = 0.01, max = 0.5), extend("step" = 0.01))]
    pub tube_radius: f32,
    /// Segments along the backbone tube.
    #[schemars(skip)]
    pub tube_tubular_segments: u32,
    /// Segments around the backbone tube.
    #[schemars(skip)]
    pub tube_radial_segments: u32,
    /// Rung cylinder radius.
    #[schemars(title = "Rung Radius", range(min = 0.005, max = 0.3), extend("step" = 0.005))]
    pub rung_radius: f32,
    /// Segments around each rung cylinder.
    #[schemars(skip)]
    pub rung_radial_segments: u32,
    /// Junction node sphere radius.
    #[schemars(title = "Node Radius", range(min = 0.01, max = 0.5), extend("step" = 0.01))]
    pub node_radius: f32,
    /// Longitudinal segments of each node sphere.
    #[schemars(skip)]
    pub node_width_segments: u32,
    /// Latitudinal segments of each node sphere.
    #[schemars(skip)]
    pub node_height_segments: u32,
    /// Backbone spline parameterization.
    #[schemars(skip)]
    pub spline: SplineKind,
    /// Tension used by [`SplineKind::Uniform`].
    #[schemars(skip)]
    pub tension: f32,
}

impl Default for HelixOptions {
    fn default() -> Self {
        Self {
            base_pairs: 20,
            vertical_step: 0.4,
            radius: 1.2,
            twist_per_step: 0.55,
            tube_radius: 0.08,
            tube_tubular_segments: 200,
            tube_radial_segments: 8,
            rung_radius: 0.035,
            rung_radial_segments: 8,
            node_radius: 0.14,
            node_width_segments: 16,
            node_height_segments: 12,
            spline: SplineKind::Centripetal,
            tension: 0.5,
        }
    }
}

impl HelixOptions {
    /// Total height spanned by the base pairs (`N * vertical_step`).
    #[must_use]
    pub fn height(&self) -> f32 {
        self.base_pairs as f32 * self.vertical_step
    }

    /// Stable digest of every field, used as a cache key.
    #[must_use]
    pub fn digest(&self) -> u64 {
        use std::hash::{Hash, Hasher};

        let mut hasher = rustc_hash::FxHasher::default();
        self.base_pairs.hash(&mut hasher);
        for value in [
            self.vertical_step,
            self.radius,
            self.twist_per_step,
            self.tube_radius,
            self.rung_radius,
            self.node_radius,
            self.tension,
        ] {
            value.to_bits().hash(&mut hasher);
        }
        for count in [
            self.tube_tubular_segments,
            self.tube_radial_segments,
            self.rung_radial_segments,
            self.node_width_segments,
            self.node_height_segments,
        ] {
            count.hash(&mut hasher);
        }
        self.spline.hash(&mut hasher);
        hasher.finish()
    }
}
