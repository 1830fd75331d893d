//! GPU scene host: owns the render context, pipelines and helix processor
//! for an existing surface.

mod command;
mod input;
mod options;

pub use command::EngineCommand;

use crate::camera::controller::CameraController;
use crate::error::DuplexError;
use crate::gpu::lighting::LightingUniform;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::gpu::texture::FrameTargets;
use crate::gpu::uniform::UniformBuffer;
use crate::helix::processor::HelixProcessor;
use crate::helix::{HelixPose, PreparedHelix};
use crate::input::InputProcessor;
use crate::options::Options;
use crate::renderer::{MeshPass, ShimmerPass};
use crate::shell::PageShell;
use crate::util::color::srgb_to_linear;
use crate::util::frame_timing::{Clock, FrameTiming};

/// Frames between FPS log lines when `debug.log_fps` is on.
const FPS_LOG_INTERVAL: u32 = 120;

/// The scene host: draws the helix (or the loading placeholder) into a
/// wgpu surface.
///
/// # Construction
///
/// Use [`HelixEngine::new`] for a window surface or
/// [`HelixEngine::from_context`] for a surface-less context created with
/// [`RenderContext::from_device`]. Either way the first helix build is
/// queued immediately on the background thread.
///
/// # Frame loop
///
/// Each frame, call [`update`](Self::update) with the frame delta, then
/// [`render`](Self::render) to draw and present. Call
/// [`resize`](Self::resize) when the window size changes. Input is
/// forwarded via [`handle_input`](Self::handle_input).
///
/// # Loading
///
/// Until the first build arrives the engine draws the shimmer placeholder.
/// The pose clock starts when the helix first becomes visible, so the
/// helix always starts at rest.
pub struct HelixEngine {
    /// Core wgpu device, queue, and surface.
    pub context: RenderContext,
    shader_composer: ShaderComposer,
    targets: FrameTargets,

    /// Orbital camera controller.
    pub camera_controller: CameraController,
    lighting: UniformBuffer<LightingUniform>,
    mesh_pass: MeshPass,
    shimmer_pass: ShimmerPass,

    /// Overlay text and loading state.
    shell: PageShell,
    /// Background thread building the helix geometry.
    processor: HelixProcessor,
    /// Pointer state feeding orbit commands.
    input: InputProcessor,
    /// Runtime shape, palette, motion, lighting, camera and display options.
    options: Options,

    /// Newest generation on the GPU (0 = nothing yet).
    uploaded_generation: u64,
    /// Set when the shell leaves the loading state, cleared by
    /// [`take_became_ready`](Self::take_became_ready).
    became_ready: bool,
    /// Seconds since the helix became visible.
    helix_clock: Clock,
    /// Seconds since construction; drives the shimmer.
    shimmer_clock: Clock,
    /// Per-frame timing and FPS tracking.
    frame_timing: FrameTiming,
    frames_since_log: u32,
    scale_factor: f64,
}

impl HelixEngine {
    /// Engine for a window surface.
    ///
    /// # Errors
    ///
    /// Returns [`DuplexError`] if GPU initialization, shader composition,
    /// or spawning the builder thread fails.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        scale_factor: f64,
        options: Options,
    ) -> Result<Self, DuplexError> {
        let context = RenderContext::new(
            window,
            size,
            options.display.transparent_background,
        )
        .await?;
        Self::from_context(context, scale_factor, options)
    }

    /// Engine from a pre-built [`RenderContext`] (for embedding or
    /// headless rendering).
    ///
    /// # Errors
    ///
    /// Returns [`DuplexError`] if shader composition or spawning the
    /// builder thread fails.
    pub fn from_context(
        context: RenderContext,
        scale_factor: f64,
        options: Options,
    ) -> Result<Self, DuplexError> {
        let mut shader_composer = ShaderComposer::new()?;
        let sample_count = options.display.sample_count();
        let targets = FrameTargets::new(
            &context.device,
            context.format(),
            context.config.width,
            context.config.height,
            sample_count,
        );

        let camera_controller = CameraController::new(&context, &options.camera);
        let lighting = UniformBuffer::new(
            &context.device,
            "Lighting",
            LightingUniform::from_options(&options.lighting),
            wgpu::ShaderStages::FRAGMENT,
        );
        let mesh_pass = MeshPass::new(
            &context,
            camera_controller.layout(),
            lighting.layout(),
            sample_count,
            &mut shader_composer,
        )?;
        let shimmer_pass =
            ShimmerPass::new(&context, sample_count, &mut shader_composer)?;

        let processor = HelixProcessor::new()?;
        let shell = PageShell::new(&options.shell);
        let frame_timing = FrameTiming::new(options.display.target_fps);

        let mut engine = Self {
            context,
            shader_composer,
            targets,
            camera_controller,
            lighting,
            mesh_pass,
            shimmer_pass,
            shell,
            processor,
            input: InputProcessor::new(),
            options,
            uploaded_generation: 0,
            became_ready: false,
            helix_clock: Clock::new(),
            shimmer_clock: Clock::new(),
            frame_timing,
            frames_since_log: 0,
            scale_factor,
        };
        engine.apply_options();
        engine.submit_build();
        log::info!(
            "engine ready: {}x{}, {}x MSAA, transparent {}",
            engine.context.config.width,
            engine.context.config.height,
            sample_count,
            engine.context.is_transparent()
        );
        Ok(engine)
    }

    /// Rebuild pipelines and attachments for a new sample count. Uploaded
    /// geometry survives, so no rebuild is queued.
    fn recreate_passes(&mut self) -> Result<(), DuplexError> {
        let sample_count = self.options.display.sample_count();
        self.mesh_pass.set_sample_count(
            &self.context,
            self.camera_controller.layout(),
            self.lighting.layout(),
            sample_count,
            &mut self.shader_composer,
        )?;
        self.shimmer_pass = ShimmerPass::new(
            &self.context,
            sample_count,
            &mut self.shader_composer,
        )?;
        self.targets = FrameTargets::new(
            &self.context.device,
            self.context.format(),
            self.context.config.width,
            self.context.config.height,
            sample_count,
        );
        log::debug!("recreated passes for {sample_count}x MSAA");
        Ok(())
    }

    /// Page shell state (loading or ready).
    #[must_use]
    pub fn shell(&self) -> &PageShell {
        &self.shell
    }

    /// Whether the placeholder is still showing.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.shell.is_loading()
    }

    /// `true` exactly once, on the first call after the helix became
    /// visible.
    pub fn take_became_ready(&mut self) -> bool {
        std::mem::take(&mut self.became_ready)
    }

    /// Number of mesh draw calls per frame once ready.
    #[must_use]
    pub fn draw_count(&self) -> usize {
        self.mesh_pass.draw_count()
    }

    /// Whether the frame limiter allows another frame now.
    #[must_use]
    pub fn should_render(&self) -> bool {
        self.frame_timing.should_render()
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.frame_timing.fps()
    }

    /// Resize the surface and size-dependent attachments.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context.resize(width, height);
        self.camera_controller.resize(width, height);
        self.targets = FrameTargets::new(
            &self.context.device,
            self.context.format(),
            width,
            height,
            self.options.display.sample_count(),
        );
    }

    /// Track the window's DPI scale (used for the placeholder size).
    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        self.scale_factor = scale_factor;
    }

    /// Current DPI scale.
    #[must_use]
    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Advance by `dt` seconds: pick up finished builds and move the
    /// camera.
    pub fn update(&mut self, dt: f32) {
        if let Some(prepared) = self.processor.try_recv() {
            self.upload_helix(&prepared);
        }
        self.camera_controller.update(dt);
    }

    fn upload_helix(&mut self, prepared: &PreparedHelix) {
        if prepared.generation < self.uploaded_generation {
            log::debug!(
                "dropping stale helix build #{} (have #{})",
                prepared.generation,
                self.uploaded_generation
            );
            return;
        }
        self.mesh_pass
            .upload(&self.context.device, &self.context.queue, prepared);
        self.uploaded_generation = prepared.generation;
        log::debug!(
            "uploaded helix build #{}: {} batches, {} instances",
            prepared.generation,
            prepared.batches.len(),
            prepared.instance_count()
        );

        if self.shell.mark_ready() {
            self.helix_clock.reset();
            self.became_ready = true;
            log::info!("helix visible");
        }
    }

    /// Pose of the helix group right now.
    #[must_use]
    pub fn current_pose(&self) -> HelixPose {
        if self.shell.is_loading() {
            HelixPose::default()
        } else {
            HelixPose::at(&self.options.motion, self.helix_clock.elapsed_secs())
        }
    }

    /// Render one frame to the surface and present it.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the next swapchain texture cannot
    /// be acquired. The caller reconfigures on `Lost`/`Outdated`.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.render_to_view(&view);
        frame.present();
        self.end_frame();
        Ok(())
    }

    /// Render one frame into `view`, which must match the context's format
    /// and size.
    pub fn render_to_view(&mut self, view: &wgpu::TextureView) {
        let loading = self.shell.is_loading();
        let model = self.current_pose().model_matrix();
        let queue = &self.context.queue;
        self.camera_controller.update_gpu(queue);
        if loading {
            self.shimmer_pass.update(
                queue,
                &self.shell,
                (self.context.config.width, self.context.config.height),
                self.scale_factor,
                self.shimmer_clock.elapsed_secs(),
            );
        } else {
            self.mesh_pass.set_group_transform(queue, model);
        }

        let mut encoder = self.context.create_encoder();
        {
            let mut render_pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Main Pass"),
                    color_attachments: &[Some(
                        self.targets.color_attachment(view, self.clear_color()),
                    )],
                    depth_stencil_attachment: Some(
                        self.targets.depth_attachment(),
                    ),
                    timestamp_writes: None,
                    occlusion_query_set: None,
                });
            if loading {
                self.shimmer_pass.draw(&mut render_pass);
            } else {
                self.mesh_pass.draw(
                    &mut render_pass,
                    self.camera_controller.bind_group(),
                    self.lighting.bind_group(),
                );
            }
        }
        self.context.submit(encoder);
    }

    /// Fully transparent when the surface keeps alpha, else the configured
    /// background.
    fn clear_color(&self) -> wgpu::Color {
        if self.context.is_transparent() {
            return wgpu::Color::TRANSPARENT;
        }
        let [r, g, b] = srgb_to_linear(self.options.display.background);
        wgpu::Color {
            r: f64::from(r),
            g: f64::from(g),
            b: f64::from(b),
            a: 1.0,
        }
    }

    fn end_frame(&mut self) {
        self.frame_timing.end_frame();
        if !self.options.debug.log_fps {
            return;
        }
        self.frames_since_log += 1;
        if self.frames_since_log >= FPS_LOG_INTERVAL {
            self.frames_since_log = 0;
            log::info!("{:.1} fps", self.frame_timing.fps());
        }
    }
}
