//! The engine's complete interactive vocabulary.
//!
//! Every user-facing operation is an `EngineCommand`. The
//! [`InputProcessor`](crate::input::InputProcessor) produces them from
//! window events; embedders may also construct them directly and pass them
//! to [`HelixEngine::execute`](super::HelixEngine::execute).

use glam::Vec2;

/// One camera interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineCommand {
    /// The primary button went down: orbit drag starts and auto-rotate
    /// pauses.
    BeginOrbit,
    /// Rotate the orbit by a cursor delta in physical pixels.
    RotateCamera {
        /// Cursor movement since the previous event.
        delta: Vec2,
    },
    /// The drag ended: auto-rotate resumes.
    EndOrbit,
    /// Move the camera along its view ray (positive = closer).
    ZoomCamera {
        /// Wheel steps.
        delta: f32,
    },
}
