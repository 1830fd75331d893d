//! Native loading placeholder: a rounded bar with a sweeping highlight.
//!
//! Mirrors the page shell's CSS placeholder so hosts without a webview
//! still show the loading state. Drawn as one fullscreen triangle that
//! discards everything outside the bar.

use bytemuck::{Pod, Zeroable};

use super::pipeline_util;
use crate::{
    error::DuplexError,
    gpu::{
        render_context::RenderContext, shader_composer::ShaderComposer,
        uniform::UniformBuffer,
    },
    shell::{shimmer_offset, PageShell},
    util::color::srgb_to_linear_rgba,
};

/// Placeholder uniform. Must match `ShimmerUniform` in `shimmer.wgsl`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct ShimmerUniform {
    /// Bar bounds in framebuffer pixels: `[x0, y0, x1, y1]`.
    pub rect: [f32; 4],
    /// Linear base color.
    pub base: [f32; 4],
    /// Linear highlight color.
    pub highlight: [f32; 4],
    /// x: background position (2.0 = 200%), y: corner radius in pixels.
    pub params: [f32; 4],
}

impl ShimmerUniform {
    /// Uniform for `shell` on a `width` x `height` surface at time `t`.
    #[must_use]
    pub fn new(
        shell: &PageShell,
        size: (u32, u32),
        scale_factor: f64,
        t: f32,
    ) -> Self {
        let options = shell.options();
        Self {
            rect: shell.placeholder_rect(size.0, size.1, scale_factor),
            base: srgb_to_linear_rgba(options.placeholder_base, 1.0),
            highlight: srgb_to_linear_rgba(options.placeholder_highlight, 1.0),
            params: [
                shimmer_offset(t, options.shimmer_period_secs),
                shell.placeholder_radius(scale_factor),
                0.0,
                0.0,
            ],
        }
    }
}

/// Fullscreen pass that draws the placeholder bar.
pub struct ShimmerPass {
    pipeline: wgpu::RenderPipeline,
    uniform: UniformBuffer<ShimmerUniform>,
}

impl ShimmerPass {
    /// Build the pipeline for the surface format and sample count.
    ///
    /// # Errors
    ///
    /// Returns [`DuplexError::Shader`] if `shimmer.wgsl` fails to compose.
    pub fn new(
        context: &RenderContext,
        sample_count: u32,
        shader_composer: &mut ShaderComposer,
    ) -> Result<Self, DuplexError> {
        let uniform = UniformBuffer::new(
            &context.device,
            "Shimmer",
            ShimmerUniform::default(),
            wgpu::ShaderStages::FRAGMENT,
        );

        let shader = shader_composer.compose(
            &context.device,
            "Shimmer Shader",
            include_str!("../../assets/shaders/screen/shimmer.wgsl"),
            "shimmer.wgsl",
        )?;

        let layout = context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Shimmer Pipeline Layout"),
                bind_group_layouts: &[uniform.layout()],
                push_constant_ranges: &[],
            },
        );

        let pipeline = context.device.create_render_pipeline(
            &wgpu::RenderPipelineDescriptor {
                label: Some("Shimmer Pipeline"),
                layout: Some(&layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &pipeline_util::color_target(
                        context.format(),
                        Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                    ),
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState::default(),
                depth_stencil: Some(pipeline_util::overlay_depth_state()),
                multisample: pipeline_util::multisample(sample_count),
                multiview: None,
                cache: None,
            },
        );

        Ok(Self { pipeline, uniform })
    }

    /// Write this frame's placeholder geometry and sweep position.
    pub fn update(
        &mut self,
        queue: &wgpu::Queue,
        shell: &PageShell,
        size: (u32, u32),
        scale_factor: f64,
        t: f32,
    ) {
        self.uniform
            .write(queue, ShimmerUniform::new(shell, size, scale_factor, t));
    }

    /// Last uniform written.
    #[must_use]
    pub fn uniform(&self) -> &ShimmerUniform {
        self.uniform.get()
    }

    /// Draw the bar.
    pub fn draw<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, self.uniform.bind_group(), &[]);
        render_pass.draw(0..3, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ShellOptions;

    #[test]
    fn uniform_is_four_vec4s() {
        assert_eq!(size_of::<ShimmerUniform>(), 64);
    }

    #[test]
    fn uniform_tracks_shell_and_time() {
        let shell = PageShell::new(&ShellOptions::default());
        let at_start = ShimmerUniform::new(&shell, (800, 600), 1.0, 0.0);
        assert_eq!(at_start.rect, [280.0, 294.0, 520.0, 306.0]);
        assert_eq!(at_start.params[0], 2.0);
        assert_eq!(at_start.params[1], 6.0);
        assert_eq!(at_start.base[3], 1.0);

        let halfway = ShimmerUniform::new(&shell, (800, 600), 1.0, 0.75);
        assert!(halfway.params[0].abs() < 1e-5);
        assert_eq!(halfway.rect, at_start.rect);
    }

    #[test]
    fn colors_are_linearized() {
        let shell = PageShell::new(&ShellOptions::default());
        let u = ShimmerUniform::new(&shell, (800, 600), 1.0, 0.0);
        let srgb = shell.options().placeholder_highlight;
        for (linear, encoded) in u.highlight.iter().zip(srgb) {
            assert!(*linear < encoded);
        }
    }
}
