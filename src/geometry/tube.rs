//! Strand mesher: sweeps a circular cross-section along a curve.

use std::f32::consts::TAU;

use super::{
    curve::SpatialCurve,
    spline::{compute_rmf, SplinePoint},
    MeshData, MeshVertex,
};

/// Sweep a circle of `radius` along `curve`.
///
/// Produces `(tubular + 1) * (radial + 1)` vertices: rings are sampled at
/// equal arc-length fractions and each ring repeats its first vertex so the
/// seam has its own column. Ends are left open. A curve through fewer
/// than two control points has no length and yields an empty mesh.
#[must_use]
pub fn build_tube(
    curve: &SpatialCurve,
    tubular: u32,
    radius: f32,
    radial: u32,
) -> MeshData {
    if curve.control_points().len() < 2 {
        return MeshData::default();
    }
    let tubular = tubular.max(1);
    let radial = radial.max(3);

    let mut rings = curve.sample_uniform(tubular);
    compute_rmf(&mut rings);
    sweep(&rings, radius, radial)
}

fn sweep(rings: &[SplinePoint], radius: f32, radial: u32) -> MeshData {
    let columns = radial + 1;
    let mut vertices = Vec::with_capacity(rings.len() * columns as usize);
    for ring in rings {
        for j in 0..=radial {
            let angle = j as f32 / radial as f32 * TAU;
            let offset = ring.normal * angle.cos() + ring.binormal * angle.sin();
            vertices.push(MeshVertex {
                position: (ring.pos + offset * radius).into(),
                normal: offset.normalize_or_zero().into(),
            });
        }
    }

    let segments = rings.len().saturating_sub(1) as u32;
    let mut indices = Vec::with_capacity((segments * radial * 6) as usize);
    for i in 1..=segments {
        for j in 1..=radial {
            let a = columns * (i - 1) + (j - 1);
            let b = columns * i + (j - 1);
            let c = columns * i + j;
            let d = columns * (i - 1) + j;
            // Counter-clockwise seen from outside the tube.
            indices.extend_from_slice(&[a, d, b]);
            indices.extend_from_slice(&[b, d, c]);
        }
    }

    MeshData { vertices, indices }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::{geometry::curve::build_curve, options::HelixOptions};

    fn default_tube() -> (SpatialCurve, MeshData) {
        let params = HelixOptions::default();
        let curve = build_curve(&params, 0.0);
        let mesh = build_tube(&curve, 200, params.tube_radius, 8);
        (curve, mesh)
    }

    #[test]
    fn vertex_and_index_counts() {
        let (_, mesh) = default_tube();
        assert_eq!(mesh.vertices.len(), 201 * 9);
        assert_eq!(mesh.indices.len(), 200 * 8 * 6);
        assert_eq!(mesh.index_count(), 9600);
        let max = *mesh.indices.iter().max().unwrap();
        assert!((max as usize) < mesh.vertices.len());
    }

    #[test]
    fn vertices_sit_at_tube_radius_from_centerline() {
        let (curve, mesh) = default_tube();
        for (i, ring) in mesh.vertices.chunks(9).enumerate() {
            let center = curve.point_at(i as f32 / 200.0);
            for v in ring {
                let d = Vec3::from(v.position).distance(center);
                assert!((d - 0.08).abs() < 1e-4, "ring {i}: {d}");
            }
        }
    }

    #[test]
    fn normals_point_outward() {
        let (curve, mesh) = default_tube();
        let center = curve.point_at(0.5);
        for v in &mesh.vertices[100 * 9..101 * 9] {
            let outward = (Vec3::from(v.position) - center).normalize();
            assert!(Vec3::from(v.normal).dot(outward) > 0.999);
        }
    }

    #[test]
    fn triangles_wind_outward() {
        let (_, mesh) = default_tube();
        for tri in mesh.indices.chunks(3).step_by(97) {
            let [a, b, c] = [tri[0], tri[1], tri[2]]
                .map(|i| mesh.vertices[i as usize]);
            let face = (Vec3::from(b.position) - Vec3::from(a.position))
                .cross(Vec3::from(c.position) - Vec3::from(a.position));
            assert!(face.dot(Vec3::from(a.normal)) > 0.0);
        }
    }

    #[test]
    fn single_point_curve_gives_empty_mesh() {
        let params = HelixOptions {
            base_pairs: 0,
            ..HelixOptions::default()
        };
        let curve = build_curve(&params, 0.0);
        assert_eq!(curve.control_points().len(), 1);
        let mesh = build_tube(&curve, 200, params.tube_radius, 8);
        assert!(mesh.is_empty());
        assert_eq!(mesh.index_count(), 0);
    }

    #[test]
    fn every_vertex_is_finite() {
        let (_, mesh) = default_tube();
        for v in &mesh.vertices {
            assert!(Vec3::from(v.position).is_finite());
            assert!(Vec3::from(v.normal).is_finite());
        }
    }

    #[test]
    fn seam_column_duplicates_first_vertex() {
        let (_, mesh) = default_tube();
        for ring in mesh.vertices.chunks(9) {
            let first = Vec3::from(ring[0].position);
            let last = Vec3::from(ring[8].position);
            assert!(first.distance(last) < 1e-5);
        }
    }
}
