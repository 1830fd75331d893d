//! Transparent wry webview that renders the page shell over the scene.
//!
//! While loading, the webview covers the whole window so the CSS shimmer
//! lines up with the native one. Once ready, it shrinks to the text band so
//! orbit drags anywhere else reach the winit window directly.
//!
//! The webview is a native child window and swallows the pointer events
//! that land on it. The page posts them back over IPC, and
//! [`page_to_window`] maps them into window coordinates so the host can
//! feed them to the engine like any other input.

use std::sync::mpsc;

use serde::Deserialize;
use wry::{dpi, Rect, WebView, WebViewBuilder};

use super::{PageShell, READY_SCRIPT};
use crate::{
    error::DuplexError,
    input::{InputEvent, MouseButton},
};

/// Pixels of DOM wheel delta per wheel step.
const PIXELS_PER_WHEEL_STEP: f32 = 100.0;

/// Notifications sent from the page to the host.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellEvent {
    /// The document finished loading.
    Loaded,
    /// Pointer input that hit the page. Cursor positions are CSS pixels
    /// relative to the webview.
    Input(InputEvent),
}

/// Raw IPC message from [`BRIDGE_JS`].
#[derive(Debug, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum PageMessage {
    Loaded,
    PointerMove { x: f32, y: f32 },
    PointerDown { x: f32, y: f32, button: u16 },
    PointerUp { x: f32, y: f32, button: u16 },
    Wheel { dy: f32, mode: u32 },
}

/// Child webview showing the page shell.
pub struct ShellView {
    webview: WebView,
    events: mpsc::Receiver<ShellEvent>,
}

impl ShellView {
    /// Build the webview as a child of `window`, sized for the current
    /// shell state.
    pub fn new<W: wry::raw_window_handle::HasWindowHandle>(
        window: &W,
        shell: &PageShell,
        size: (u32, u32),
        scale_factor: f64,
    ) -> Result<Self, DuplexError> {
        let (tx, events) = mpsc::channel();
        let webview = WebViewBuilder::new()
            .with_transparent(true)
            .with_bounds(shell_bounds(shell, size.0, size.1, scale_factor))
            .with_initialization_script(BRIDGE_JS)
            .with_html(shell.document())
            .with_ipc_handler(move |req| {
                for event in parse_events(req.body()) {
                    let _ = tx.send(event);
                }
            })
            .build_as_child(window)
            .map_err(|e| DuplexError::Shell(e.to_string()))?;
        Ok(Self { webview, events })
    }

    /// Drain pending page notifications.
    pub fn poll_events(&self) -> Vec<ShellEvent> {
        self.events.try_iter().collect()
    }

    /// Remove the placeholder and shrink to the text band.
    pub fn mark_ready(
        &self,
        shell: &PageShell,
        size: (u32, u32),
        scale_factor: f64,
    ) {
        if let Err(e) = self.webview.evaluate_script(READY_SCRIPT) {
            log::warn!("page shell ready script failed: {e}");
        }
        self.resize(shell, size, scale_factor);
    }

    /// Re-fit the webview after a window resize or state change.
    pub fn resize(&self, shell: &PageShell, size: (u32, u32), scale_factor: f64) {
        let bounds = shell_bounds(shell, size.0, size.1, scale_factor);
        if let Err(e) = self.webview.set_bounds(bounds) {
            log::warn!("page shell resize failed: {e}");
        }
    }
}

/// Webview rectangle for the shell's current state, in physical pixels.
#[must_use]
pub fn shell_bounds(
    shell: &PageShell,
    width: u32,
    height: u32,
    scale_factor: f64,
) -> Rect {
    let (y, h) = if shell.is_loading() {
        (0, height)
    } else {
        shell.text_band(height, scale_factor)
    };
    Rect {
        position: dpi::Position::Physical(dpi::PhysicalPosition::new(
            0,
            y as i32,
        )),
        size: dpi::Size::Physical(dpi::PhysicalSize::new(width, h)),
    }
}

/// Map a page-space [`InputEvent`] into window physical pixels, given the
/// webview's current `bounds`.
#[must_use]
pub fn page_to_window(
    event: InputEvent,
    bounds: &Rect,
    scale_factor: f64,
) -> InputEvent {
    let InputEvent::CursorMoved { x, y } = event else {
        return event;
    };
    let origin = bounds.position.to_physical::<f64>(scale_factor);
    InputEvent::CursorMoved {
        x: (f64::from(x) * scale_factor + origin.x) as f32,
        y: (f64::from(y) * scale_factor + origin.y) as f32,
    }
}

/// Injected before the document loads. Reports the load and forwards
/// pointer input, keeping the pointer captured while a button is held.
const BRIDGE_JS: &str = r#"
(function() {
    function post(msg) {
        if (window.ipc) {
            window.ipc.postMessage(JSON.stringify(msg));
        }
    }
    window.addEventListener('DOMContentLoaded', function() {
        post({ event: 'loaded' });
    });
    window.addEventListener('pointerdown', function(e) {
        if (e.target && e.target.setPointerCapture) {
            e.target.setPointerCapture(e.pointerId);
        }
        post({ event: 'pointer_down', x: e.clientX, y: e.clientY, button: e.button });
    });
    window.addEventListener('pointermove', function(e) {
        post({ event: 'pointer_move', x: e.clientX, y: e.clientY });
    });
    window.addEventListener('pointerup', function(e) {
        post({ event: 'pointer_up', x: e.clientX, y: e.clientY, button: e.button });
    });
    window.addEventListener('wheel', function(e) {
        e.preventDefault();
        post({ event: 'wheel', dy: e.deltaY, mode: e.deltaMode });
    }, { passive: false });
})();
"#;

fn dom_button(button: u16) -> MouseButton {
    match button {
        1 => MouseButton::Middle,
        2 => MouseButton::Right,
        _ => MouseButton::Left,
    }
}

fn parse_events(body: &str) -> Vec<ShellEvent> {
    let Ok(msg) = serde_json::from_str::<PageMessage>(body) else {
        return Vec::new();
    };
    let press = |x, y, button, pressed| {
        vec![
            ShellEvent::Input(InputEvent::CursorMoved { x, y }),
            ShellEvent::Input(InputEvent::MouseButton {
                button: dom_button(button),
                pressed,
            }),
        ]
    };
    match msg {
        PageMessage::Loaded => vec![ShellEvent::Loaded],
        PageMessage::PointerMove { x, y } => {
            vec![ShellEvent::Input(InputEvent::CursorMoved { x, y })]
        }
        PageMessage::PointerDown { x, y, button } => press(x, y, button, true),
        PageMessage::PointerUp { x, y, button } => press(x, y, button, false),
        PageMessage::Wheel { dy, mode } => {
            // DOM deltaY grows downward; positive steps zoom in.
            let steps = if mode == 0 { -dy / PIXELS_PER_WHEEL_STEP } else { -dy };
            vec![ShellEvent::Input(InputEvent::Scroll { delta: steps })]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{engine::EngineCommand, options::ShellOptions};

    fn physical(rect: &Rect) -> (i32, i32, u32, u32) {
        let dpi::Position::Physical(pos) = rect.position else {
            unreachable!("shell bounds are physical");
        };
        let dpi::Size::Physical(size) = rect.size else {
            unreachable!("shell bounds are physical");
        };
        (pos.x, pos.y, size.width, size.height)
    }

    #[test]
    fn loading_bounds_cover_window() {
        let shell = PageShell::new(&ShellOptions::default());
        let rect = shell_bounds(&shell, 1280, 720, 1.0);
        assert_eq!(physical(&rect), (0, 0, 1280, 720));
    }

    #[test]
    fn ready_bounds_shrink_to_text_band() {
        let mut shell = PageShell::new(&ShellOptions::default());
        let _ = shell.mark_ready();
        let (x, y, w, h) = physical(&shell_bounds(&shell, 1280, 720, 1.0));
        let (band_y, band_h) = shell.text_band(720, 1.0);
        assert_eq!((x, w), (0, 1280));
        assert_eq!((y, h), (band_y as i32, band_h));
        assert!(h < 720);
    }

    #[test]
    fn ipc_messages_parse() {
        assert_eq!(parse_events(r#"{"event":"loaded"}"#), vec![ShellEvent::Loaded]);
        assert!(parse_events(r#"{"event":"other"}"#).is_empty());
        assert!(parse_events("not json").is_empty());
    }

    #[test]
    fn page_pointer_messages_become_input() {
        assert_eq!(
            parse_events(r#"{"event":"pointer_down","x":10,"y":5,"button":0}"#),
            vec![
                ShellEvent::Input(InputEvent::CursorMoved { x: 10.0, y: 5.0 }),
                ShellEvent::Input(InputEvent::MouseButton {
                    button: MouseButton::Left,
                    pressed: true,
                }),
            ]
        );
        assert_eq!(
            parse_events(r#"{"event":"pointer_up","x":1,"y":2,"button":2}"#)[1],
            ShellEvent::Input(InputEvent::MouseButton {
                button: MouseButton::Right,
                pressed: false,
            })
        );
        assert_eq!(
            parse_events(r#"{"event":"wheel","dy":-200,"mode":0}"#),
            vec![ShellEvent::Input(InputEvent::Scroll { delta: 2.0 })]
        );
        assert_eq!(
            parse_events(r#"{"event":"wheel","dy":3,"mode":1}"#),
            vec![ShellEvent::Input(InputEvent::Scroll { delta: -3.0 })]
        );
    }

    #[test]
    fn page_cursor_maps_into_text_band() {
        let mut shell = PageShell::new(&ShellOptions::default());
        let _ = shell.mark_ready();
        let bounds = shell_bounds(&shell, 1600, 1200, 2.0);
        let (band_y, _) = shell.text_band(1200, 2.0);

        let mapped = page_to_window(
            InputEvent::CursorMoved { x: 10.0, y: 5.0 },
            &bounds,
            2.0,
        );
        assert_eq!(
            mapped,
            InputEvent::CursorMoved {
                x: 20.0,
                y: band_y as f32 + 10.0,
            }
        );

        let scroll = InputEvent::Scroll { delta: 1.0 };
        assert_eq!(page_to_window(scroll, &bounds, 2.0), scroll);
    }

    #[test]
    fn drag_over_the_text_band_orbits() {
        let mut shell = PageShell::new(&ShellOptions::default());
        let _ = shell.mark_ready();
        let bounds = shell_bounds(&shell, 1280, 720, 1.0);
        let mut input = crate::input::InputProcessor::new();
        let mut commands = Vec::new();
        for body in [
            r#"{"event":"pointer_down","x":100,"y":10,"button":0}"#,
            r#"{"event":"pointer_move","x":130,"y":14}"#,
            r#"{"event":"pointer_up","x":130,"y":14,"button":0}"#,
        ] {
            for event in parse_events(body) {
                let ShellEvent::Input(event) = event else {
                    continue;
                };
                commands.extend(
                    input.handle_event(page_to_window(event, &bounds, 1.0)),
                );
            }
        }
        assert_eq!(
            commands,
            vec![
                EngineCommand::BeginOrbit,
                EngineCommand::RotateCamera {
                    delta: glam::Vec2::new(30.0, 4.0),
                },
                EngineCommand::EndOrbit,
            ]
        );
    }
}
