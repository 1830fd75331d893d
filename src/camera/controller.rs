use glam::Vec2;

use super::{
    core::{Camera, CameraUniform},
    orbit::OrbitController,
};
use crate::{
    gpu::{render_context::RenderContext, uniform::UniformBuffer},
    options::CameraOptions,
};

/// Orbit camera plus its GPU uniform.
pub struct CameraController {
    /// Projection and view state written to the GPU each frame.
    pub camera: Camera,
    /// Spherical orbit state driving `camera`.
    pub orbit: OrbitController,
    uniform: UniformBuffer<CameraUniform>,
    debug_mode: u32,
}

impl CameraController {
    /// Camera at the configured position, sized to the surface.
    #[must_use]
    pub fn new(context: &RenderContext, options: &CameraOptions) -> Self {
        let mut camera = Camera::from_options(options, context.aspect());
        let mut orbit = OrbitController::new(options);
        orbit.set_viewport_height(context.config.height as f32);
        orbit.apply_to(&mut camera);

        let mut value = CameraUniform::new();
        value.update_view_proj(&camera);
        let uniform = UniformBuffer::new(
            &context.device,
            "Camera",
            value,
            wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        );

        Self {
            camera,
            orbit,
            uniform,
            debug_mode: 0,
        }
    }

    /// Adopt new projection parameters and orbit limits.
    pub fn apply_options(&mut self, options: &CameraOptions) {
        self.camera.fovy = options.fovy;
        self.camera.znear = options.znear;
        self.camera.zfar = options.zfar;
        self.orbit.apply_options(options);
        self.orbit.apply_to(&mut self.camera);
    }

    /// Toggle the world-normal debug view.
    pub fn set_show_normals(&mut self, show: bool) {
        self.debug_mode = u32::from(show);
    }

    /// Track a new surface size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.camera.aspect = width as f32 / height as f32;
            self.orbit.set_viewport_height(height as f32);
        }
    }

    /// Rotate by a cursor delta in pixels.
    pub fn rotate(&mut self, delta: Vec2) {
        self.orbit.rotate(delta);
        self.orbit.apply_to(&mut self.camera);
    }

    /// Zoom by wheel steps (positive = closer).
    pub fn zoom(&mut self, delta: f32) {
        self.orbit.zoom(delta);
        self.orbit.apply_to(&mut self.camera);
    }

    /// Advance orbit motion by `dt` seconds.
    pub fn update(&mut self, dt: f32) {
        self.orbit.update(dt);
        self.orbit.apply_to(&mut self.camera);
    }

    /// Upload the current camera state.
    pub fn update_gpu(&mut self, queue: &wgpu::Queue) {
        let mut value = *self.uniform.get();
        value.update_view_proj(&self.camera);
        value.debug_mode = self.debug_mode;
        self.uniform.write(queue, value);
    }

    /// Bind group layout for pipelines.
    #[must_use]
    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        self.uniform.layout()
    }

    /// Bind group for draw calls.
    #[must_use]
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        self.uniform.bind_group()
    }
}
