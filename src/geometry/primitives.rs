//! Prototype meshes shared by every instance of a batch.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use super::{MeshData, MeshVertex};

/// Capped cylinder of `radius` along +Y, spanning `y` in `[-1, 1]`.
///
/// A rung instance scales Y by half the rung length so both caps land on
/// the rung endpoints.
#[must_use]
pub fn unit_cylinder(radius: f32, radial: u32) -> MeshData {
    let radial = radial.max(3);
    let columns = radial + 1;
    let mut mesh = MeshData::default();

    // Side: bottom row then top row, seam column duplicated.
    for y in [-1.0_f32, 1.0] {
        for j in 0..=radial {
            let theta = j as f32 / radial as f32 * TAU;
            let (sin, cos) = theta.sin_cos();
            mesh.vertices.push(MeshVertex {
                position: [radius * cos, y, radius * sin],
                normal: [cos, 0.0, sin],
            });
        }
    }
    for j in 0..radial {
        let a = j;
        let b = j + 1;
        let c = columns + j + 1;
        let d = columns + j;
        mesh.indices.extend_from_slice(&[a, d, b, b, d, c]);
    }

    push_cap(&mut mesh, radius, radial, 1.0);
    push_cap(&mut mesh, radius, radial, -1.0);
    mesh
}

fn push_cap(mesh: &mut MeshData, radius: f32, radial: u32, y: f32) {
    let normal = [0.0, y.signum(), 0.0];
    let center = mesh.vertices.len() as u32;
    mesh.vertices.push(MeshVertex {
        position: [0.0, y, 0.0],
        normal,
    });
    for j in 0..radial {
        let theta = j as f32 / radial as f32 * TAU;
        let (sin, cos) = theta.sin_cos();
        mesh.vertices.push(MeshVertex {
            position: [radius * cos, y, radius * sin],
            normal,
        });
    }
    for j in 0..radial {
        let current = center + 1 + j;
        let next = center + 1 + (j + 1) % radial;
        if y > 0.0 {
            mesh.indices.extend_from_slice(&[center, next, current]);
        } else {
            mesh.indices.extend_from_slice(&[center, current, next]);
        }
    }
}

/// UV sphere of `radius` centered on the origin.
///
/// `width` segments run around the equator, `height` from pole to pole.
/// Pole rows emit one triangle per quad, so the index count is
/// `6 * width * (height - 1)`.
#[must_use]
pub fn uv_sphere(radius: f32, width: u32, height: u32) -> MeshData {
    let width = width.max(3);
    let height = height.max(2);
    let columns = width + 1;
    let mut mesh = MeshData::default();

    for iy in 0..=height {
        let v = iy as f32 / height as f32;
        let theta = v * PI;
        for ix in 0..=width {
            let u = ix as f32 / width as f32;
            let phi = u * TAU;
            let normal = Vec3::new(
                -phi.cos() * theta.sin(),
                theta.cos(),
                phi.sin() * theta.sin(),
            );
            mesh.vertices.push(MeshVertex {
                position: (normal * radius).into(),
                normal: normal.into(),
            });
        }
    }

    for iy in 0..height {
        for ix in 0..width {
            let a = iy * columns + ix + 1;
            let b = iy * columns + ix;
            let c = (iy + 1) * columns + ix;
            let d = (iy + 1) * columns + ix + 1;
            if iy != 0 {
                mesh.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != height - 1 {
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    mesh
}
