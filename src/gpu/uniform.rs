//! A single POD value mirrored into a uniform buffer with its own bind
//! group.

use wgpu::util::DeviceExt;

/// Uniform buffer, bind-group layout, and bind group for one `T`.
pub struct UniformBuffer<T: bytemuck::Pod> {
    value: T,
    buffer: wgpu::Buffer,
    layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
}

impl<T: bytemuck::Pod> UniformBuffer<T> {
    /// Upload `value` and build a one-entry bind group visible to
    /// `visibility`.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        label: &str,
        value: T,
        visibility: wgpu::ShaderStages,
    ) -> Self {
        let buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Buffer")),
                contents: bytemuck::bytes_of(&value),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });

        let layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some(&format!("{label} Bind Group Layout")),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{label} Bind Group")),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        Self {
            value,
            buffer,
            layout,
            bind_group,
        }
    }

    /// Last value written.
    #[must_use]
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replace the value and upload it.
    pub fn write(&mut self, queue: &wgpu::Queue, value: T) {
        self.value = value;
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(&self.value));
    }

    /// Layout for pipeline creation.
    #[must_use]
    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    /// Bind group for draw calls.
    #[must_use]
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}
