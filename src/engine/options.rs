//! Options methods for HelixEngine

use super::HelixEngine;
use crate::{
    error::DuplexError, gpu::lighting::LightingUniform, options::Options,
};

impl HelixEngine {
    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Replace options and apply all changes to subsystems.
    ///
    /// Shape or palette changes queue one background rebuild; the current
    /// helix stays on screen until the new one lands. A sample-count change
    /// swaps pipelines and keeps the uploaded geometry.
    ///
    /// # Errors
    ///
    /// Returns [`DuplexError::Shader`] if a sample-count change requires
    /// new pipelines and they fail to compose.
    pub fn set_options(&mut self, new: Options) -> Result<(), DuplexError> {
        let change = self.options.change_to(&new);
        self.options = new;

        if change.resample {
            self.recreate_passes()?;
        }
        if change.rebuild {
            self.submit_build();
        }
        self.apply_options();
        Ok(())
    }

    /// Push current option values to the camera, lights, shell and frame
    /// limiter.
    pub(super) fn apply_options(&mut self) {
        self.camera_controller.apply_options(&self.options.camera);
        self.camera_controller
            .set_show_normals(self.options.debug.show_normals);
        self.lighting.write(
            &self.context.queue,
            LightingUniform::from_options(&self.options.lighting),
        );
        self.shell.set_options(&self.options.shell);
        self.frame_timing
            .set_target_fps(self.options.display.target_fps);
    }

    /// Queue a background build for the current helix options.
    pub(super) fn submit_build(&mut self) {
        let generation = self
            .processor
            .submit(&self.options.helix, &self.options.colors);
        log::debug!("submitted helix build #{generation}");
    }
}
