//! Standalone hero window backed by winit.
//!
//! The window is transparent where the platform allows it. With the `gui`
//! feature a wry webview carries the page shell (heading, subtitle,
//! shimmering placeholder) over the scene; pointer input landing on it is
//! relayed back to the engine. Without it the heading becomes
//! the window title and the engine's native shimmer pass shows the
//! loading state.
//!
//! ```no_run
//! # use duplex::Viewer;
//! Viewer::builder()
//!     .with_title("Duplex")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use web_time::Instant;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

#[cfg(feature = "gui")]
use crate::shell::webview::{page_to_window, shell_bounds, ShellEvent};
use crate::{
    error::DuplexError, options::Options, shell::PageShell, HelixEngine,
    InputEvent, MouseButton,
};

/// Pixels of trackpad scroll per wheel step.
const PIXELS_PER_SCROLL_STEP: f32 = 100.0;

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: Option<String>,
}

impl ViewerBuilder {
    /// Create a builder with default options and a title taken from the
    /// shell heading.
    fn new() -> Self {
        Self {
            options: None,
            title: None,
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        let options = self.options.unwrap_or_default();
        let title = self.title.unwrap_or_else(|| {
            PageShell::new(&options.shell).title().to_owned()
        });
        Viewer { options, title }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that displays the animated helix.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Window title this viewer will use.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`DuplexError::Viewer`] if the event loop cannot be created
    /// or exits with an error.
    pub fn run(self) -> Result<(), DuplexError> {
        let event_loop =
            EventLoop::new().map_err(|e| DuplexError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            last_frame_time: Instant::now(),
            options: Some(self.options),
            title: self.title,
            #[cfg(feature = "gui")]
            shell_view: None,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| DuplexError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<HelixEngine>,
    last_frame_time: Instant,
    /// Taken when the engine is created.
    options: Option<Options>,
    title: String,
    #[cfg(feature = "gui")]
    shell_view: Option<crate::shell::webview::ShellView>,
}

/// Compute the wgpu surface size: always the full window dimensions.
fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

#[cfg(feature = "gui")]
impl ViewerApp {
    /// Create the page-shell webview over the window. A failure leaves the
    /// native placeholder in charge.
    fn create_shell_view(&mut self, window: &Window, engine: &HelixEngine) {
        #[cfg(target_os = "linux")]
        if let Err(e) = gtk::init() {
            log::error!("failed to initialize GTK: {e}");
            return;
        }
        match crate::shell::webview::ShellView::new(
            window,
            engine.shell(),
            viewport_size(window.inner_size()),
            window.scale_factor(),
        ) {
            Ok(view) => self.shell_view = Some(view),
            Err(e) => log::error!("{e}"),
        }
    }

    /// Drain page notifications: feed pointer input that hit the webview
    /// to the engine, and resend the ready signal to a document that
    /// loaded after it.
    fn pump_shell_events(&mut self) {
        let (Some(view), Some(engine), Some(window)) =
            (&self.shell_view, &mut self.engine, &self.window)
        else {
            return;
        };
        let size = viewport_size(window.inner_size());
        let scale = window.scale_factor();

        let mut reloaded = false;
        for event in view.poll_events() {
            match event {
                ShellEvent::Loaded => reloaded = true,
                ShellEvent::Input(input) => {
                    let bounds =
                        shell_bounds(engine.shell(), size.0, size.1, scale);
                    engine.handle_input(page_to_window(input, &bounds, scale));
                }
            }
        }
        if reloaded && !engine.is_loading() {
            view.mark_ready(engine.shell(), size, scale);
        }
    }

    /// Shrink the webview once the helix is visible.
    fn show_ready_shell_view(&self) {
        if let (Some(view), Some(engine), Some(window)) =
            (&self.shell_view, &self.engine, &self.window)
        {
            view.mark_ready(
                engine.shell(),
                viewport_size(window.inner_size()),
                window.scale_factor(),
            );
        }
    }

    fn resize_shell_view(&self) {
        if let (Some(view), Some(engine), Some(window)) =
            (&self.shell_view, &self.engine, &self.window)
        {
            view.resize(
                engine.shell(),
                viewport_size(window.inner_size()),
                window.scale_factor(),
            );
        }
    }
}

impl ViewerApp {
    fn redraw(&mut self) {
        let (Some(window), Some(engine)) = (&self.window, &mut self.engine)
        else {
            return;
        };
        window.request_redraw();
        if !engine.should_render() {
            return;
        }

        let now = Instant::now();
        let dt = now.duration_since(self.last_frame_time).as_secs_f32();
        self.last_frame_time = now;

        engine.update(dt);
        match engine.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                log::debug!("surface lost, reconfiguring");
                engine.context.reconfigure();
            }
            Err(e) => {
                log::error!("render error: {e:?}");
            }
        }

        let ready_changed = engine.take_became_ready();
        #[cfg(feature = "gui")]
        if ready_changed {
            self.show_ready_shell_view();
        }
        #[cfg(not(feature = "gui"))]
        let _ = ready_changed;
    }

    fn forward_input(&mut self, event: InputEvent) {
        if let Some(engine) = &mut self.engine {
            engine.handle_input(event);
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let Some(options) = self.options.take() else {
            return;
        };

        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let mut attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_transparent(options.display.transparent_background);
        if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            let logical_w = (mon_size.width as f64 / scale * 0.75) as u32;
            let logical_h = (mon_size.height as f64 / scale * 0.75) as u32;
            attrs = attrs.with_inner_size(winit::dpi::LogicalSize::new(
                logical_w, logical_h,
            ));
        }

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let engine = match pollster::block_on(HelixEngine::new(
            window.clone(),
            viewport_size(window.inner_size()),
            window.scale_factor(),
            options,
        )) {
            Ok(e) => e,
            Err(e) => {
                log::error!("Failed to initialize engine: {e}");
                event_loop.exit();
                return;
            }
        };

        #[cfg(feature = "gui")]
        self.create_shell_view(&window, &engine);

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        // Guard: both window and engine must be initialised.
        if self.window.is_none() || self.engine.is_none() {
            return;
        }

        match event {
            WindowEvent::Resized(event_size) => {
                let (vp_w, vp_h) = viewport_size(event_size);
                if let Some(engine) = &mut self.engine {
                    engine.resize(vp_w, vp_h);
                }
                #[cfg(feature = "gui")]
                self.resize_shell_view();
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let Some(engine) = &mut self.engine {
                    engine.set_scale_factor(scale_factor);
                }
                #[cfg(feature = "gui")]
                self.resize_shell_view();
            }

            WindowEvent::RedrawRequested => self.redraw(),

            WindowEvent::MouseInput { button, state, .. } => {
                self.forward_input(InputEvent::MouseButton {
                    button: MouseButton::from(button),
                    pressed: state == ElementState::Pressed,
                });
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.forward_input(InputEvent::CursorMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                });
            }

            WindowEvent::CursorLeft { .. } | WindowEvent::Focused(false) => {
                self.forward_input(InputEvent::Released);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let steps = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => {
                        pos.y as f32 / PIXELS_PER_SCROLL_STEP
                    }
                };
                self.forward_input(InputEvent::Scroll { delta: steps });
            }

            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        // wry's GTK webview needs the GTK loop pumped alongside winit's.
        #[cfg(all(feature = "gui", target_os = "linux"))]
        while gtk::events_pending() {
            let _ = gtk::main_iteration_do(false);
        }
        #[cfg(feature = "gui")]
        self.pump_shell_events();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_defaults_to_heading() {
        let viewer = Viewer::builder().build();
        assert_eq!(viewer.title(), "Decode the building blocks of life");
    }

    #[test]
    fn explicit_title_and_options_win() {
        let mut options = Options::default();
        options.shell.heading = "  Spun  ".to_owned();
        let viewer = Viewer::builder().with_options(options.clone()).build();
        assert_eq!(viewer.title(), "Spun");

        let viewer = Viewer::builder()
            .with_options(options)
            .with_title("Duplex")
            .build();
        assert_eq!(viewer.title(), "Duplex");
    }

    #[test]
    fn viewport_is_never_zero() {
        let size = viewport_size(winit::dpi::PhysicalSize::new(0, 480));
        assert_eq!(size, (1, 480));
    }
}
