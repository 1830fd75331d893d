//! Input and command dispatch for HelixEngine

use super::{EngineCommand, HelixEngine};
use crate::input::InputEvent;

impl HelixEngine {
    /// Process a platform-agnostic input event.
    ///
    /// Consumers forward raw window events as [`InputEvent`] variants; the
    /// engine's input processor turns them into orbit and zoom commands.
    ///
    /// # Example
    ///
    /// ```ignore
    /// engine.handle_input(InputEvent::CursorMoved { x, y });
    /// engine.handle_input(InputEvent::Scroll { delta: 1.0 });
    /// ```
    pub fn handle_input(&mut self, event: InputEvent) {
        if let Some(command) = self.input.handle_event(event) {
            self.execute(command);
        }
    }

    /// Apply one command to the camera.
    pub fn execute(&mut self, command: EngineCommand) {
        match command {
            EngineCommand::BeginOrbit => {
                self.camera_controller.orbit.set_dragging(true);
            }
            EngineCommand::RotateCamera { delta } => {
                self.camera_controller.rotate(delta);
            }
            EngineCommand::EndOrbit => {
                self.camera_controller.orbit.set_dragging(false);
            }
            EngineCommand::ZoomCamera { delta } => {
                self.camera_controller.zoom(delta);
            }
        }
    }
}
