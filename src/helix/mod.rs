//! The composed double helix and its per-frame pose.
//!
//! A [`HelixAssembly`] is built once from [`HelixOptions`] and
//! [`ColorOptions`]: two mirrored backbone strands with their junction
//! nodes, and one rung field joining them. Motion is not stored in the
//! assembly; [`HelixPose::at`] turns elapsed time into a group transform
//! each frame.

pub mod prepared;
pub mod processor;

use std::sync::Arc;

use glam::{Mat4, Quat, Vec3};
pub use prepared::{InstanceData, PreparedBatch, PreparedHelix};
use rustc_hash::FxHashMap;

use crate::{
    geometry::{
        build_curve, build_tube, junction_transforms,
        primitives::{unit_cylinder, uv_sphere},
        rung_transforms, InstanceTransform, MeshData, SpatialCurve, Strand,
    },
    options::{ColorOptions, HelixOptions, MotionOptions},
    util::hash::{angle_key, hash_vec3_slice},
};

/// Centerline and swept tube of one strand. Color-independent, so it can
/// be shared between assemblies with different palettes.
#[derive(Debug, Clone)]
pub struct StrandMesh {
    /// Interpolated centerline.
    pub curve: SpatialCurve,
    /// Tube swept along `curve`.
    pub tube: MeshData,
}

/// Memoized strand meshes keyed by `(phase, parameter digest)`.
#[derive(Debug, Default)]
pub struct StrandCache {
    entries: FxHashMap<(u32, u64), Arc<StrandMesh>>,
    hits: u64,
}

impl StrandCache {
    /// Empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached mesh for `(params, phase)`, building it on a miss.
    pub fn get_or_build(
        &mut self,
        params: &HelixOptions,
        phase: f32,
    ) -> Arc<StrandMesh> {
        let key = (angle_key(phase), params.digest());
        if let Some(mesh) = self.entries.get(&key) {
            self.hits += 1;
            return Arc::clone(mesh);
        }

        let curve = build_curve(params, phase);
        let tube = build_tube(
            &curve,
            params.tube_tubular_segments,
            params.tube_radius,
            params.tube_radial_segments,
        );
        log::debug!(
            "built strand mesh (phase {phase:.3}): {} vertices, {} indices, centerline {:016x}",
            tube.vertices.len(),
            tube.indices.len(),
            hash_vec3_slice(curve.control_points())
        );
        let mesh = Arc::new(StrandMesh { curve, tube });
        let _ = self.entries.insert(key, Arc::clone(&mesh));
        mesh
    }

    /// Number of distinct strand meshes held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been built yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lookups answered without building.
    #[must_use]
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// Drop every entry whose parameter digest differs from `params`.
    pub fn retain_params(&mut self, params: &HelixOptions) {
        let digest = params.digest();
        self.entries.retain(|&(_, d), _| d == digest);
    }
}

/// One backbone strand with its color and junction nodes.
#[derive(Debug, Clone)]
pub struct BackboneStrand {
    /// Which of the two strands this is.
    pub strand: Strand,
    /// RGB color shared by the tube and its nodes.
    pub color: [f32; 3],
    /// Centerline and tube.
    pub mesh: Arc<StrandMesh>,
    /// One node transform per base pair.
    pub nodes: Vec<InstanceTransform>,
}

/// Rotation and vertical offset of the helix group at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HelixPose {
    /// Spin around the world Y axis, radians.
    pub rotation_y: f32,
    /// Vertical offset of the group.
    pub position_y: f32,
}

impl HelixPose {
    /// Pose `t` seconds after the helix became visible.
    #[must_use]
    pub fn at(motion: &MotionOptions, t: f32) -> Self {
        Self {
            rotation_y: t * motion.spin_rate,
            position_y: (t * motion.bob_frequency).sin() * motion.bob_amplitude,
        }
    }

    /// Group model matrix: `translate(0, y, 0) * rotate_y(angle)`.
    #[must_use]
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(
            Quat::from_rotation_y(self.rotation_y),
            Vec3::new(0.0, self.position_y, 0.0),
        )
    }
}

/// Both strands, their nodes, and the rung field.
#[derive(Debug, Clone)]
pub struct HelixAssembly {
    /// Parameters the geometry was built from.
    pub params: HelixOptions,
    /// Strand A (phase 0) and strand B (phase π).
    pub strands: [BackboneStrand; 2],
    /// One rung per base pair.
    pub rungs: Vec<InstanceTransform>,
    /// RGB rung color.
    pub rung_color: [f32; 3],
    /// Rung opacity in `[0, 1]`.
    pub rung_opacity: f32,
    /// Prototype cylinder every rung instances.
    pub rung_mesh: MeshData,
    /// Prototype sphere every node instances.
    pub node_mesh: MeshData,
}

impl HelixAssembly {
    /// Build the full assembly, reusing strand meshes from `cache`.
    #[must_use]
    pub fn build(
        params: &HelixOptions,
        colors: &ColorOptions,
        cache: &mut StrandCache,
    ) -> Self {
        let strands = Strand::BOTH.map(|strand| BackboneStrand {
            strand,
            color: colors.backbone(strand),
            mesh: cache.get_or_build(params, strand.phase()),
            nodes: junction_transforms(params, strand.phase()),
        });

        Self {
            params: params.clone(),
            strands,
            rungs: rung_transforms(params),
            rung_color: colors.rung,
            rung_opacity: colors.rung_opacity.clamp(0.0, 1.0),
            rung_mesh: unit_cylinder(
                params.rung_radius,
                params.rung_radial_segments,
            ),
            node_mesh: uv_sphere(
                params.node_radius,
                params.node_width_segments,
                params.node_height_segments,
            ),
        }
    }

    /// Strand by identity.
    #[must_use]
    pub fn strand(&self, strand: Strand) -> &BackboneStrand {
        &self.strands[strand.index()]
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use super::*;

    fn assembly() -> HelixAssembly {
        let mut cache = StrandCache::new();
        HelixAssembly::build(
            &HelixOptions::default(),
            &ColorOptions::default(),
            &mut cache,
        )
    }

    #[test]
    fn counts_match_base_pairs() {
        let helix = assembly();
        assert_eq!(helix.rungs.len(), 20);
        for strand in &helix.strands {
            assert_eq!(strand.nodes.len(), 20);
            assert_eq!(strand.mesh.curve.control_points().len(), 81);
        }
    }

    #[test]
    fn strands_carry_their_palette_colors() {
        let helix = assembly();
        let colors = ColorOptions::default();
        assert_eq!(helix.strand(Strand::A).color, colors.backbone_a);
        assert_eq!(helix.strand(Strand::B).color, colors.backbone_b);
        assert_eq!(helix.rung_color, colors.rung);
    }

    #[test]
    fn rung_endpoints_meet_nodes_at_same_height() {
        let helix = assembly();
        let a = &helix.strand(Strand::A).nodes;
        let b = &helix.strand(Strand::B).nodes;
        for (i, rung) in helix.rungs.iter().enumerate() {
            let bottom = rung.apply(Vec3::NEG_Y);
            let top = rung.apply(Vec3::Y);
            assert!(bottom.distance(a[i].translation) < 1e-4);
            assert!(top.distance(b[i].translation) < 1e-4);
            assert_eq!(a[i].translation.y, b[i].translation.y);
        }
    }

    #[test]
    fn pose_starts_at_rest() {
        let pose = HelixPose::at(&MotionOptions::default(), 0.0);
        assert_eq!(pose.rotation_y, 0.0);
        assert_eq!(pose.position_y, 0.0);
        assert_eq!(pose.model_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn bob_peaks_at_pi_seconds() {
        let pose = HelixPose::at(&MotionOptions::default(), PI);
        assert!((pose.position_y - 0.15).abs() < 1e-6);
        assert!((pose.rotation_y - PI * 0.15).abs() < 1e-6);
    }

    #[test]
    fn bob_never_exceeds_amplitude() {
        let motion = MotionOptions::default();
        for k in 0..2000 {
            let pose = HelixPose::at(&motion, k as f32 * 0.037);
            assert!(pose.position_y.abs() <= 0.15 + 1e-6);
        }
    }

    #[test]
    fn model_matrix_spins_then_lifts() {
        let pose = HelixPose {
            rotation_y: PI / 2.0,
            position_y: 0.1,
        };
        let p = pose.model_matrix().transform_point3(Vec3::X);
        assert!(p.distance(Vec3::new(0.0, 0.1, -1.0)) < 1e-5);
    }

    #[test]
    fn cache_reuses_identical_strands() {
        let params = HelixOptions::default();
        let colors = ColorOptions::default();
        let mut cache = StrandCache::new();
        let first = HelixAssembly::build(&params, &colors, &mut cache);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.hits(), 0);

        let recolored = ColorOptions {
            rung: [1.0, 0.0, 0.0],
            ..colors.clone()
        };
        let second = HelixAssembly::build(&params, &recolored, &mut cache);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.hits(), 2);
        assert!(Arc::ptr_eq(&first.strands[0].mesh, &second.strands[0].mesh));

        // The cached centerline is bit-identical to a fresh build.
        let fresh = build_curve(&params, Strand::B.phase());
        let cached = &second.strand(Strand::B).mesh.curve;
        assert_eq!(
            hash_vec3_slice(cached.control_points()),
            hash_vec3_slice(fresh.control_points())
        );
        let fresh_tube = build_tube(
            &fresh,
            params.tube_tubular_segments,
            params.tube_radius,
            params.tube_radial_segments,
        );
        let positions = |mesh: &MeshData| -> Vec<Vec3> {
            mesh.vertices.iter().map(|v| Vec3::from(v.position)).collect()
        };
        assert_eq!(
            hash_vec3_slice(&positions(&second.strand(Strand::B).mesh.tube)),
            hash_vec3_slice(&positions(&fresh_tube))
        );

        let wider = HelixOptions {
            radius: 2.0,
            ..params
        };
        let _ = HelixAssembly::build(&wider, &colors, &mut cache);
        assert_eq!(cache.len(), 4);
        cache.retain_params(&wider);
        assert_eq!(cache.len(), 2);
    }
}
