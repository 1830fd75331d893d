//! Instanced mesh pass: one indexed draw per prepared batch.
//!
//! Every batch owns a vertex, index and instance buffer. Opaque batches
//! draw first with depth writes; translucent ones follow, blended and
//! depth-tested without writing depth. All instances are moved by one
//! group transform (the helix pose).

use bytemuck::{Pod, Zeroable};
use glam::Mat4;

use super::pipeline_util;
use crate::{
    error::DuplexError,
    gpu::{
        dynamic_buffer::DynamicBuffer, render_context::RenderContext,
        shader_composer::ShaderComposer, uniform::UniformBuffer,
    },
    helix::{PreparedBatch, PreparedHelix},
};

/// Group transform uniform. Must match `GroupUniform` in `mesh.wgsl`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GroupUniform {
    /// Column-major model matrix applied after each instance's own.
    pub model: [[f32; 4]; 4],
}

impl Default for GroupUniform {
    fn default() -> Self {
        Self {
            model: Mat4::IDENTITY.to_cols_array_2d(),
        }
    }
}

/// GPU buffers of one [`PreparedBatch`].
struct GpuBatch {
    vertices: DynamicBuffer,
    indices: DynamicBuffer,
    instances: DynamicBuffer,
    index_count: u32,
    instance_count: u32,
    translucent: bool,
}

impl GpuBatch {
    fn new(device: &wgpu::Device, label: &str) -> Self {
        Self {
            vertices: DynamicBuffer::new(
                device,
                &format!("{label} Vertices"),
                0,
                wgpu::BufferUsages::VERTEX,
            ),
            indices: DynamicBuffer::new(
                device,
                &format!("{label} Indices"),
                0,
                wgpu::BufferUsages::INDEX,
            ),
            instances: DynamicBuffer::new(
                device,
                &format!("{label} Instances"),
                0,
                wgpu::BufferUsages::VERTEX,
            ),
            index_count: 0,
            instance_count: 0,
            translucent: false,
        }
    }

    fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        batch: &PreparedBatch,
    ) {
        let _ = self.vertices.write_bytes(device, queue, &batch.vertices);
        let _ = self.indices.write_bytes(device, queue, &batch.indices);
        let _ = self.instances.write_bytes(device, queue, &batch.instances);
        self.index_count = batch.index_count;
        self.instance_count = batch.instance_count;
        self.translucent = batch.translucent;
    }

    fn draw<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        if self.index_count == 0 || self.instance_count == 0 {
            return;
        }
        render_pass.set_vertex_buffer(0, self.vertices.slice());
        render_pass.set_vertex_buffer(1, self.instances.slice());
        render_pass
            .set_index_buffer(self.indices.slice(), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..self.index_count, 0, 0..self.instance_count);
    }
}

/// Instanced lit geometry of the helix.
pub struct MeshPass {
    opaque_pipeline: wgpu::RenderPipeline,
    translucent_pipeline: wgpu::RenderPipeline,
    group: UniformBuffer<GroupUniform>,
    batches: Vec<GpuBatch>,
}

impl MeshPass {
    /// Build both pipelines for the surface format and sample count.
    ///
    /// # Errors
    ///
    /// Returns [`DuplexError::Shader`] if `mesh.wgsl` fails to compose.
    pub fn new(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
        lighting_layout: &wgpu::BindGroupLayout,
        sample_count: u32,
        shader_composer: &mut ShaderComposer,
    ) -> Result<Self, DuplexError> {
        let group = UniformBuffer::new(
            &context.device,
            "Helix Group",
            GroupUniform::default(),
            wgpu::ShaderStages::VERTEX,
        );
        let (opaque_pipeline, translucent_pipeline) = Self::create_pipelines(
            context,
            &[camera_layout, lighting_layout, group.layout()],
            sample_count,
            shader_composer,
        )?;

        Ok(Self {
            opaque_pipeline,
            translucent_pipeline,
            group,
            batches: Vec::new(),
        })
    }

    /// Swap in pipelines for a new sample count. Uploaded batches and the
    /// group transform are kept, so the helix stays on screen.
    ///
    /// # Errors
    ///
    /// Returns [`DuplexError::Shader`] if `mesh.wgsl` fails to compose.
    pub fn set_sample_count(
        &mut self,
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
        lighting_layout: &wgpu::BindGroupLayout,
        sample_count: u32,
        shader_composer: &mut ShaderComposer,
    ) -> Result<(), DuplexError> {
        let (opaque, translucent) = Self::create_pipelines(
            context,
            &[camera_layout, lighting_layout, self.group.layout()],
            sample_count,
            shader_composer,
        )?;
        self.opaque_pipeline = opaque;
        self.translucent_pipeline = translucent;
        Ok(())
    }

    fn create_pipelines(
        context: &RenderContext,
        bind_group_layouts: &[&wgpu::BindGroupLayout],
        sample_count: u32,
        shader_composer: &mut ShaderComposer,
    ) -> Result<(wgpu::RenderPipeline, wgpu::RenderPipeline), DuplexError> {
        let shader = shader_composer.compose(
            &context.device,
            "Mesh Shader",
            include_str!("../../assets/shaders/raster/mesh.wgsl"),
            "mesh.wgsl",
        )?;

        let layout = context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Mesh Pipeline Layout"),
                bind_group_layouts,
                push_constant_ranges: &[],
            },
        );

        let opaque = Self::create_pipeline(
            context,
            &layout,
            &shader,
            sample_count,
            false,
        );
        let translucent =
            Self::create_pipeline(context, &layout, &shader, sample_count, true);
        Ok((opaque, translucent))
    }

    fn create_pipeline(
        context: &RenderContext,
        layout: &wgpu::PipelineLayout,
        shader: &wgpu::ShaderModule,
        sample_count: u32,
        translucent: bool,
    ) -> wgpu::RenderPipeline {
        let (label, blend) = if translucent {
            (
                "Mesh Pipeline (translucent)",
                Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
            )
        } else {
            ("Mesh Pipeline (opaque)", None)
        };

        context
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(layout),
                vertex: wgpu::VertexState {
                    module: shader,
                    entry_point: Some("vs_main"),
                    buffers: &[
                        pipeline_util::mesh_vertex_layout(),
                        pipeline_util::instance_layout(),
                    ],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: shader,
                    entry_point: Some("fs_main"),
                    targets: &pipeline_util::color_target(
                        context.format(),
                        blend,
                    ),
                    compilation_options: Default::default(),
                }),
                // Both faces: translucent rungs show their far side.
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    front_face: wgpu::FrontFace::Ccw,
                    cull_mode: None,
                    ..Default::default()
                },
                depth_stencil: Some(pipeline_util::depth_stencil_state(
                    !translucent,
                )),
                multisample: pipeline_util::multisample(sample_count),
                multiview: None,
                cache: None,
            })
    }

    /// Replace all batches with a freshly built helix.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        prepared: &PreparedHelix,
    ) {
        self.batches.truncate(prepared.batches.len());
        while self.batches.len() < prepared.batches.len() {
            let label = prepared.batches[self.batches.len()].label;
            self.batches.push(GpuBatch::new(device, label));
        }
        for (gpu, batch) in self.batches.iter_mut().zip(&prepared.batches) {
            gpu.upload(device, queue, batch);
        }
    }

    /// Write the group transform for this frame.
    pub fn set_group_transform(&mut self, queue: &wgpu::Queue, model: Mat4) {
        self.group.write(
            queue,
            GroupUniform {
                model: model.to_cols_array_2d(),
            },
        );
    }

    /// Number of draw calls [`Self::draw`] issues.
    #[must_use]
    pub fn draw_count(&self) -> usize {
        self.batches
            .iter()
            .filter(|b| b.index_count > 0 && b.instance_count > 0)
            .count()
    }

    /// Draw opaque batches, then translucent ones.
    pub fn draw<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        camera_bind_group: &'a wgpu::BindGroup,
        lighting_bind_group: &'a wgpu::BindGroup,
    ) {
        render_pass.set_bind_group(0, camera_bind_group, &[]);
        render_pass.set_bind_group(1, lighting_bind_group, &[]);
        render_pass.set_bind_group(2, self.group.bind_group(), &[]);

        render_pass.set_pipeline(&self.opaque_pipeline);
        for batch in self.batches.iter().filter(|b| !b.translucent) {
            batch.draw(render_pass);
        }
        render_pass.set_pipeline(&self.translucent_pipeline);
        for batch in self.batches.iter().filter(|b| b.translucent) {
            batch.draw(render_pass);
        }
    }
}
