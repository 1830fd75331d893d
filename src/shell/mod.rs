//! Page shell: the heading, subtitle and loading placeholder that sit on
//! top of the 3D scene.
//!
//! The shell is a tiny state machine. It starts in [`ShellState::Loading`],
//! where the shimmering placeholder bar stands in for the scene, and moves
//! once to [`ShellState::Ready`] when the first helix build is on the GPU.
//! The text overlay never intercepts pointer input so orbit dragging keeps
//! working underneath it.
//!
//! [`PageShell::document`] renders the overlay as a standalone HTML page for
//! the `gui` webview. The renderer draws the same placeholder natively via
//! [`crate::renderer::shimmer`] so headless hosts still see the loading
//! state.

pub mod style;
#[cfg(feature = "gui")]
pub mod webview;

use style::{css_rgb, escape_html, Style};

use crate::options::ShellOptions;

/// Background position (in units of the element width) at the start of a
/// shimmer sweep. CSS `200%`.
pub const SHIMMER_START: f32 = 2.0;
/// Background position at the end of a sweep. CSS `-200%`.
pub const SHIMMER_END: f32 = -2.0;

/// Name of the CSS keyframes driving the placeholder.
const SHIMMER_KEYFRAMES: &str = "duplex-shimmer";

/// Script the host evaluates once the scene is visible.
pub const READY_SCRIPT: &str = "window.__duplex_ready && window.__duplex_ready();";

/// Loading state of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShellState {
    /// Helix not built yet; the placeholder is shown.
    #[default]
    Loading,
    /// Scene on screen; the placeholder is gone for good.
    Ready,
}

/// Horizontal background position of the shimmer gradient at time `t`
/// seconds, as a fraction of the placeholder width.
///
/// Sweeps linearly from [`SHIMMER_START`] to [`SHIMMER_END`] once per
/// `period` and repeats forever. A non-positive period pins the gradient at
/// the start position.
#[must_use]
pub fn shimmer_offset(t: f32, period: f32) -> f32 {
    if period <= 0.0 || !t.is_finite() {
        return SHIMMER_START;
    }
    let progress = (t / period).rem_euclid(1.0);
    SHIMMER_START + (SHIMMER_END - SHIMMER_START) * progress
}

/// Overlay text, placeholder look and loading state.
#[derive(Debug, Clone)]
pub struct PageShell {
    options: ShellOptions,
    state: ShellState,
}

impl PageShell {
    /// New shell in the loading state.
    #[must_use]
    pub fn new(options: &ShellOptions) -> Self {
        Self {
            options: options.clone(),
            state: ShellState::Loading,
        }
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &ShellOptions {
        &self.options
    }

    /// Replace text and styling. Does not affect the loading state.
    pub fn set_options(&mut self, options: &ShellOptions) {
        self.options = options.clone();
    }

    /// Current loading state.
    #[must_use]
    pub fn state(&self) -> ShellState {
        self.state
    }

    /// Whether the placeholder is still showing.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state == ShellState::Loading
    }

    /// Switch to [`ShellState::Ready`]. Returns `true` only on the first
    /// call; the shell never returns to loading.
    pub fn mark_ready(&mut self) -> bool {
        let changed = self.state == ShellState::Loading;
        self.state = ShellState::Ready;
        changed
    }

    /// Window title derived from the heading.
    #[must_use]
    pub fn title(&self) -> &str {
        self.options.heading.trim()
    }

    /// Placeholder bar in physical pixels, centered in a surface of
    /// `width` x `height`: `[x0, y0, x1, y1]`.
    #[must_use]
    pub fn placeholder_rect(
        &self,
        width: u32,
        height: u32,
        scale_factor: f64,
    ) -> [f32; 4] {
        let scale = scale_factor as f32;
        let w = (self.options.placeholder_width_px as f32 * scale)
            .min(width as f32);
        let h = (self.options.placeholder_height_px as f32 * scale)
            .min(height as f32);
        let x0 = (width as f32 - w) * 0.5;
        let y0 = (height as f32 - h) * 0.5;
        [x0, y0, x0 + w, y0 + h]
    }

    /// Corner radius of the placeholder bar in physical pixels.
    #[must_use]
    pub fn placeholder_radius(&self, scale_factor: f64) -> f32 {
        self.options.placeholder_height_px as f32 * 0.5 * scale_factor as f32
    }

    /// Vertical band (`y`, `height` in physical pixels) that holds the text
    /// once the scene is ready. The band is centered like the overlay.
    #[must_use]
    pub fn text_band(&self, height: u32, scale_factor: f64) -> (u32, u32) {
        let lines = self.options.heading_size_px as f64 * 1.2
            + self.options.subtitle_size_px as f64 * 1.5
            + self.options.subtitle_size_px as f64;
        let band = ((lines * scale_factor).ceil() as u32).min(height);
        ((height - band) / 2, band)
    }

    /// Full HTML page for the overlay in the current state.
    #[must_use]
    pub fn document(&self) -> String {
        let heading = escape_html(&self.options.heading);
        let subtitle = escape_html(&self.options.subtitle);
        let placeholder = if self.is_loading() {
            format!(
                "<div id=\"placeholder\" style=\"{}\"></div>",
                self.placeholder_style().to_inline()
            )
        } else {
            String::new()
        };
        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
             <title>{heading}</title>\n<style>\n{keyframes}\n</style>\n\
             </head>\n<body style=\"{body}\">\n<div id=\"overlay\" \
             style=\"{overlay}\">\n<h1 style=\"{h1}\">{heading}</h1>\n\
             <p style=\"{p}\">{subtitle}</p>\n</div>\n{placeholder}\n\
             <script>\n{script}\n</script>\n</body>\n</html>\n",
            keyframes = Self::keyframes_css(),
            body = Self::body_style().to_inline(),
            overlay = Self::overlay_style().to_inline(),
            h1 = self.heading_style().to_inline(),
            p = self.subtitle_style().to_inline(),
            script = ready_hook(),
        )
    }

    /// `@keyframes` rule sweeping the background from 200% to -200%.
    #[must_use]
    pub fn keyframes_css() -> String {
        format!(
            "@keyframes {SHIMMER_KEYFRAMES} {{ 0% {{ background-position: \
             {start}% 0; }} 100% {{ background-position: {end}% 0; }} }}",
            start = (SHIMMER_START * 100.0).round() as i32,
            end = (SHIMMER_END * 100.0).round() as i32,
        )
    }

    fn body_style() -> Style {
        Style::new()
            .set("margin", "0")
            .set("width", "100vw")
            .set("height", "100vh")
            .set("overflow", "hidden")
            .set("background", "transparent")
    }

    fn overlay_style() -> Style {
        Style::new()
            .set("position", "absolute")
            .set("inset", "0")
            .set("display", "flex")
            .set("flex-direction", "column")
            .set("align-items", "center")
            .set("justify-content", "center")
            .set("text-align", "center")
            .set("pointer-events", "none")
            .set("z-index", "10")
    }

    /// Inline style of the heading.
    #[must_use]
    pub fn heading_style(&self) -> Style {
        Style::new()
            .set("margin", "0")
            .set("font-family", self.options.font_family.clone())
            .set("font-size", format!("{}px", self.options.heading_size_px))
            .set("font-weight", "700")
            .set("line-height", "1.2")
            .set("color", css_rgb(self.options.heading_color))
    }

    /// Inline style of the subtitle.
    #[must_use]
    pub fn subtitle_style(&self) -> Style {
        Style::new()
            .set("margin", format!("{}px 0 0", self.options.subtitle_size_px))
            .set("font-family", self.options.font_family.clone())
            .set("font-size", format!("{}px", self.options.subtitle_size_px))
            .set("line-height", "1.5")
            .set("color", css_rgb(self.options.subtitle_color))
    }

    /// Inline style of the shimmering placeholder bar.
    #[must_use]
    pub fn placeholder_style(&self) -> Style {
        let base = css_rgb(self.options.placeholder_base);
        let highlight = css_rgb(self.options.placeholder_highlight);
        Style::new()
            .set("position", "absolute")
            .set("top", "50%")
            .set("left", "50%")
            .set("transform", "translate(-50%, -50%)")
            .set("width", format!("{}px", self.options.placeholder_width_px))
            .set("height", format!("{}px", self.options.placeholder_height_px))
            .set(
                "border-radius",
                format!("{}px", self.options.placeholder_height_px / 2),
            )
            .set(
                "background",
                format!(
                    "linear-gradient(90deg, {base} 25%, {highlight} 50%, \
                     {base} 75%)"
                ),
            )
            .set("background-size", "200% 100%")
            .set(
                "animation",
                format!(
                    "{SHIMMER_KEYFRAMES} {}s linear infinite",
                    self.options.shimmer_period_secs
                ),
            )
    }
}

/// Page-side hook that removes the placeholder when the host reports the
/// scene is visible.
fn ready_hook() -> &'static str {
    "window.__duplex_ready = function () {\n  \
     var el = document.getElementById('placeholder');\n  \
     if (el) { el.remove(); }\n};"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shell() -> PageShell {
        PageShell::new(&ShellOptions::default())
    }

    #[test]
    fn starts_loading_and_readies_once() {
        let mut shell = shell();
        assert_eq!(shell.state(), ShellState::Loading);
        assert!(shell.is_loading());
        assert!(shell.mark_ready());
        assert!(!shell.is_loading());
        assert!(!shell.mark_ready());
        assert_eq!(shell.state(), ShellState::Ready);
    }

    #[test]
    fn shimmer_sweeps_from_start_to_end() {
        assert_eq!(shimmer_offset(0.0, 1.5), 2.0);
        assert!((shimmer_offset(0.75, 1.5)).abs() < 1e-5);
        assert!((shimmer_offset(1.499, 1.5) + 2.0).abs() < 0.01);
        assert!((shimmer_offset(1.5, 1.5) - 2.0).abs() < 1e-5);
        assert!((shimmer_offset(3.75, 1.5) - shimmer_offset(0.75, 1.5)).abs()
            < 1e-5);
    }

    #[test]
    fn shimmer_degenerate_period_holds_start() {
        assert_eq!(shimmer_offset(0.4, 0.0), SHIMMER_START);
        assert_eq!(shimmer_offset(f32::NAN, 1.5), SHIMMER_START);
    }

    #[test]
    fn loading_document_has_text_and_placeholder() {
        let doc = shell().document();
        assert!(doc.contains("Decode the building blocks of life"));
        assert!(doc.contains("Genomic insight, rendered in real time"));
        assert!(doc.contains("pointer-events: none"));
        assert!(doc.contains("id=\"placeholder\""));
        assert!(doc.contains("background-size: 200% 100%"));
        assert!(doc.contains("background-position: 200% 0"));
        assert!(doc.contains("background-position: -200% 0"));
        assert!(doc.contains("1.5s linear infinite"));
        assert!(doc.contains("background: transparent"));
    }

    #[test]
    fn ready_document_drops_placeholder() {
        let mut shell = shell();
        let _ = shell.mark_ready();
        let doc = shell.document();
        assert!(!doc.contains("id=\"placeholder\""));
        assert!(doc.contains("<h1"));
    }

    #[test]
    fn heading_text_is_escaped() {
        let options = ShellOptions {
            heading: "A <b>bold</b> & new".to_owned(),
            ..ShellOptions::default()
        };
        let doc = PageShell::new(&options).document();
        assert!(doc.contains("A &lt;b&gt;bold&lt;/b&gt; &amp; new"));
        assert!(!doc.contains("<b>bold"));
    }

    #[test]
    fn placeholder_rect_is_centered_and_scaled() {
        let shell = shell();
        let [x0, y0, x1, y1] = shell.placeholder_rect(1000, 600, 2.0);
        assert_eq!(x1 - x0, 480.0);
        assert_eq!(y1 - y0, 24.0);
        assert_eq!(x0, 260.0);
        assert_eq!(y0, 288.0);
        assert_eq!(shell.placeholder_radius(2.0), 12.0);

        // Clamped to tiny surfaces.
        let [x0, _, x1, _] = shell.placeholder_rect(100, 600, 1.0);
        assert_eq!((x0, x1), (0.0, 100.0));
    }

    #[test]
    fn text_band_fits_inside_surface() {
        let shell = shell();
        let (y, h) = shell.text_band(800, 1.0);
        assert!(h > 0 && h < 800);
        assert_eq!(y, (800 - h) / 2);
        let (y, h) = shell.text_band(20, 3.0);
        assert_eq!((y, h), (0, 20));
    }
}
