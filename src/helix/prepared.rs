//! GPU-ready byte buffers produced by the background builder.

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use super::HelixAssembly;
use crate::{
    geometry::{InstanceTransform, MeshData},
    util::color::srgb_to_linear_rgba,
};

/// Per-instance vertex data: model matrix, normal matrix, RGBA color.
///
/// The normal matrix is stored as three `vec4` columns to keep 16-byte
/// alignment in the vertex buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct InstanceData {
    /// Column-major model matrix.
    pub model: [[f32; 4]; 4],
    /// Inverse-transpose of the model's upper 3x3, padded columns.
    pub normal: [[f32; 4]; 3],
    /// Linear RGBA color, straight alpha.
    pub color: [f32; 4],
}

impl InstanceData {
    /// Pack `transform` with an RGBA color.
    #[must_use]
    pub fn new(transform: &InstanceTransform, color: [f32; 4]) -> Self {
        let n = transform.normal_matrix();
        Self {
            model: transform.to_matrix().to_cols_array_2d(),
            normal: [
                n.x_axis.extend(0.0).to_array(),
                n.y_axis.extend(0.0).to_array(),
                n.z_axis.extend(0.0).to_array(),
            ],
            color,
        }
    }

    /// Model matrix back as a glam type.
    #[must_use]
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.model)
    }
}

/// One draw call: a mesh and the instances that repeat it.
#[derive(Debug, Clone)]
pub struct PreparedBatch {
    /// Debug label for the GPU buffers.
    pub label: &'static str,
    /// `MeshVertex` bytes.
    pub vertices: Vec<u8>,
    /// `u32` index bytes.
    pub indices: Vec<u8>,
    /// Number of indices.
    pub index_count: u32,
    /// [`InstanceData`] bytes.
    pub instances: Vec<u8>,
    /// Number of instances.
    pub instance_count: u32,
    /// Drawn blended after the opaque batches.
    pub translucent: bool,
}

impl PreparedBatch {
    fn new(
        label: &'static str,
        mesh: &MeshData,
        instances: &[InstanceData],
        translucent: bool,
    ) -> Self {
        Self {
            label,
            vertices: bytemuck::cast_slice(&mesh.vertices).to_vec(),
            indices: bytemuck::cast_slice(&mesh.indices).to_vec(),
            index_count: mesh.index_count(),
            instances: bytemuck::cast_slice(instances).to_vec(),
            instance_count: instances.len() as u32,
            translucent,
        }
    }

    /// Whether the batch would draw nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index_count == 0 || self.instance_count == 0
    }
}

/// Everything the render thread uploads for one assembly.
#[derive(Debug, Clone)]
pub struct PreparedHelix {
    /// Build request this result answers.
    pub generation: u64,
    /// Strand tubes, node batches, then rungs.
    pub batches: Vec<PreparedBatch>,
}

impl PreparedHelix {
    /// Flatten an assembly into five batches.
    #[must_use]
    pub fn from_assembly(helix: &HelixAssembly, generation: u64) -> Self {
        let mut batches = Vec::with_capacity(5);
        for strand in &helix.strands {
            let rgba = srgb_to_linear_rgba(strand.color, 1.0);
            let tube = InstanceData::new(&InstanceTransform::default(), rgba);
            batches.push(PreparedBatch::new(
                "Strand Tube",
                &strand.mesh.tube,
                &[tube],
                false,
            ));
            let nodes: Vec<InstanceData> = strand
                .nodes
                .iter()
                .map(|t| InstanceData::new(t, rgba))
                .collect();
            batches.push(PreparedBatch::new(
                "Junction Nodes",
                &helix.node_mesh,
                &nodes,
                false,
            ));
        }

        let rung_rgba =
            srgb_to_linear_rgba(helix.rung_color, helix.rung_opacity);
        let rungs: Vec<InstanceData> = helix
            .rungs
            .iter()
            .map(|t| InstanceData::new(t, rung_rgba))
            .collect();
        batches.push(PreparedBatch::new(
            "Rungs",
            &helix.rung_mesh,
            &rungs,
            helix.rung_opacity < 1.0,
        ));

        Self {
            generation,
            batches,
        }
    }

    /// Total instances across all batches.
    #[must_use]
    pub fn instance_count(&self) -> u32 {
        self.batches.iter().map(|b| b.instance_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::{
        geometry::MeshVertex,
        helix::StrandCache,
        options::{ColorOptions, HelixOptions},
    };

    #[test]
    fn instance_layout_is_128_bytes() {
        assert_eq!(size_of::<InstanceData>(), 128);
    }

    #[test]
    fn five_batches_in_draw_order() {
        let mut cache = StrandCache::new();
        let helix = HelixAssembly::build(
            &HelixOptions::default(),
            &ColorOptions::default(),
            &mut cache,
        );
        let prepared = PreparedHelix::from_assembly(&helix, 7);
        assert_eq!(prepared.generation, 7);

        let counts: Vec<u32> =
            prepared.batches.iter().map(|b| b.instance_count).collect();
        assert_eq!(counts, vec![1, 20, 1, 20, 20]);
        assert_eq!(prepared.instance_count(), 62);

        let rungs = &prepared.batches[4];
        assert!(rungs.translucent);
        assert!(prepared.batches[..4].iter().all(|b| !b.translucent));

        let tube = &prepared.batches[0];
        assert_eq!(tube.index_count, 9600);
        assert_eq!(
            tube.vertices.len(),
            201 * 9 * size_of::<MeshVertex>()
        );
        assert_eq!(tube.indices.len(), 9600 * 4);
    }

    #[test]
    fn instance_round_trips_transform() {
        let t = InstanceTransform {
            translation: Vec3::new(1.0, 2.0, 3.0),
            scale: Vec3::new(1.0, 0.5, 1.0),
            ..InstanceTransform::default()
        };
        let data = InstanceData::new(&t, [0.1, 0.2, 0.3, 0.4]);
        assert_eq!(data.model_matrix(), t.to_matrix());
        // Inverse-transpose of diag(1, 0.5, 1) is diag(1, 2, 1).
        assert!((data.normal[1][1] - 2.0).abs() < 1e-6);
        assert_eq!(data.color[3], 0.4);
    }
}
