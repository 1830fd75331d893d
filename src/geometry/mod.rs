//! CPU-side helix geometry.
//!
//! Everything here is pure math over [`glam`] types: no GPU handles, no
//! shared state. The same parameters always produce the same buffers.

pub mod curve;
pub mod instances;
pub mod primitives;
pub mod spline;
pub mod tube;

use bytemuck::{Pod, Zeroable};
pub use curve::{build_curve, helix_point, SpatialCurve, Strand};
pub use instances::{junction_transforms, rung_transforms, InstanceTransform};
pub use tube::build_tube;

/// Position + normal vertex shared by every mesh in the scene.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Unit outward normal.
    pub normal: [f32; 3],
}

/// Indexed triangle list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// Vertex array.
    pub vertices: Vec<MeshVertex>,
    /// Triangle indices, three per face.
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Number of indices, as the GPU draw call wants it.
    #[must_use]
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    /// Whether the mesh has nothing to draw.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}
