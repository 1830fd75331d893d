//! Size-dependent render attachments: depth buffer and MSAA color target.

/// Depth format shared by every depth-tested pipeline.
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Attachments recreated whenever the surface size changes.
pub struct FrameTargets {
    /// Depth attachment, multisampled when MSAA is on.
    pub depth: wgpu::TextureView,
    /// Multisampled color target resolved into the swapchain texture.
    /// `None` when rendering single-sampled.
    pub msaa: Option<wgpu::TextureView>,
    /// Sample count of both attachments.
    pub sample_count: u32,
}

impl FrameTargets {
    /// Create attachments for a `width` x `height` surface of `format`.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        sample_count: u32,
    ) -> Self {
        let depth = Self::attachment(
            device,
            "Depth Texture",
            DEPTH_FORMAT,
            width,
            height,
            sample_count,
        );
        let msaa = (sample_count > 1).then(|| {
            Self::attachment(
                device,
                "MSAA Color Texture",
                format,
                width,
                height,
                sample_count,
            )
        });
        Self {
            depth,
            msaa,
            sample_count,
        }
    }

    fn attachment(
        device: &wgpu::Device,
        label: &str,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        sample_count: u32,
    ) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    /// Color attachment writing to `surface_view`, through the MSAA target
    /// when one exists.
    #[must_use]
    pub fn color_attachment<'a>(
        &'a self,
        surface_view: &'a wgpu::TextureView,
        clear: wgpu::Color,
    ) -> wgpu::RenderPassColorAttachment<'a> {
        let (view, resolve_target) = match &self.msaa {
            Some(msaa) => (msaa, Some(surface_view)),
            None => (surface_view, None),
        };
        wgpu::RenderPassColorAttachment {
            view,
            depth_slice: None,
            resolve_target,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(clear),
                store: wgpu::StoreOp::Store,
            },
        }
    }

    /// Depth attachment cleared to the far plane.
    #[must_use]
    pub fn depth_attachment(&self) -> wgpu::RenderPassDepthStencilAttachment<'_> {
        wgpu::RenderPassDepthStencilAttachment {
            view: &self.depth,
            depth_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Clear(1.0),
                store: wgpu::StoreOp::Discard,
            }),
            stencil_ops: None,
        }
    }
}
