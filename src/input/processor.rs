//! Converts raw platform events into engine commands.
//!
//! The `InputProcessor` owns the transient pointer state (last cursor
//! position, whether the primary button is held). Only orbit and zoom are
//! produced: the primary button drags the camera around the helix and the
//! wheel moves it closer or further. Other buttons are ignored, so there
//! is no pan.

use glam::Vec2;

use super::event::{InputEvent, MouseButton};
use crate::engine::EngineCommand;

/// Converts raw window events into [`EngineCommand`]s.
///
/// # Usage
///
/// ```ignore
/// if let Some(cmd) = input_processor.handle_event(event) {
///     engine.execute(cmd);
/// }
/// ```
#[derive(Debug, Default)]
pub struct InputProcessor {
    /// Last cursor position in physical pixels, once known.
    cursor: Option<Vec2>,
    /// Whether the primary mouse button is currently held.
    mouse_pressed: bool,
}

impl InputProcessor {
    /// Create a processor with no button held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current cursor position in physical pixels.
    #[must_use]
    pub fn cursor(&self) -> Option<Vec2> {
        self.cursor
    }

    /// Whether the primary mouse button is pressed.
    #[must_use]
    pub fn mouse_pressed(&self) -> bool {
        self.mouse_pressed
    }

    /// Process one event, returning the command it produces (if any).
    pub fn handle_event(&mut self, event: InputEvent) -> Option<EngineCommand> {
        match event {
            InputEvent::CursorMoved { x, y } => self.handle_cursor_moved(x, y),
            InputEvent::MouseButton { button, pressed } => {
                self.handle_mouse_button(button, pressed)
            }
            InputEvent::Scroll { delta } => {
                (delta != 0.0).then_some(EngineCommand::ZoomCamera { delta })
            }
            InputEvent::Released => self.release(),
        }
    }

    fn handle_cursor_moved(&mut self, x: f32, y: f32) -> Option<EngineCommand> {
        let position = Vec2::new(x, y);
        let previous = self.cursor.replace(position)?;
        let delta = position - previous;
        (self.mouse_pressed && delta != Vec2::ZERO)
            .then_some(EngineCommand::RotateCamera { delta })
    }

    fn handle_mouse_button(
        &mut self,
        button: MouseButton,
        pressed: bool,
    ) -> Option<EngineCommand> {
        if button != MouseButton::Left {
            return None;
        }
        if pressed {
            if self.mouse_pressed {
                return None;
            }
            self.mouse_pressed = true;
            Some(EngineCommand::BeginOrbit)
        } else {
            self.release()
        }
    }

    /// Drop any held button. Produces [`EngineCommand::EndOrbit`] only if a
    /// drag was in progress.
    fn release(&mut self) -> Option<EngineCommand> {
        let was_pressed = std::mem::replace(&mut self.mouse_pressed, false);
        was_pressed.then_some(EngineCommand::EndOrbit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(p: &mut InputProcessor) -> Option<EngineCommand> {
        p.handle_event(InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: true,
        })
    }

    fn release(p: &mut InputProcessor) -> Option<EngineCommand> {
        p.handle_event(InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: false,
        })
    }

    fn move_to(p: &mut InputProcessor, x: f32, y: f32) -> Option<EngineCommand> {
        p.handle_event(InputEvent::CursorMoved { x, y })
    }

    #[test]
    fn hover_without_button_does_nothing() {
        let mut p = InputProcessor::new();
        assert_eq!(move_to(&mut p, 10.0, 10.0), None);
        assert_eq!(move_to(&mut p, 20.0, 15.0), None);
        assert_eq!(p.cursor(), Some(Vec2::new(20.0, 15.0)));
    }

    #[test]
    fn drag_produces_rotation_deltas() {
        let mut p = InputProcessor::new();
        let _ = move_to(&mut p, 100.0, 100.0);
        assert_eq!(press(&mut p), Some(EngineCommand::BeginOrbit));
        assert!(p.mouse_pressed());
        assert_eq!(
            move_to(&mut p, 110.0, 95.0),
            Some(EngineCommand::RotateCamera {
                delta: Vec2::new(10.0, -5.0)
            })
        );
        assert_eq!(move_to(&mut p, 110.0, 95.0), None);
        assert_eq!(release(&mut p), Some(EngineCommand::EndOrbit));
        assert_eq!(release(&mut p), None);
    }

    #[test]
    fn first_cursor_position_has_no_delta() {
        let mut p = InputProcessor::new();
        let _ = press(&mut p);
        assert_eq!(move_to(&mut p, 50.0, 50.0), None);
    }

    #[test]
    fn other_buttons_do_not_orbit() {
        let mut p = InputProcessor::new();
        let cmd = p.handle_event(InputEvent::MouseButton {
            button: MouseButton::Right,
            pressed: true,
        });
        assert_eq!(cmd, None);
        assert!(!p.mouse_pressed());
    }

    #[test]
    fn scroll_zooms_and_release_ends_drag() {
        let mut p = InputProcessor::new();
        assert_eq!(
            p.handle_event(InputEvent::Scroll { delta: 1.5 }),
            Some(EngineCommand::ZoomCamera { delta: 1.5 })
        );
        assert_eq!(p.handle_event(InputEvent::Scroll { delta: 0.0 }), None);

        let _ = press(&mut p);
        assert_eq!(
            p.handle_event(InputEvent::Released),
            Some(EngineCommand::EndOrbit)
        );
        assert_eq!(p.handle_event(InputEvent::Released), None);
    }
}
