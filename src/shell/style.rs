//! Ordered CSS declarations rendered into inline `style` attributes.

use std::fmt::Write;

/// A list of CSS declarations in insertion order. Setting a property twice
/// replaces the earlier value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Style {
    declarations: Vec<(String, String)>,
}

impl Style {
    /// Empty style.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Style::insert`].
    #[must_use]
    pub fn set(mut self, property: &str, value: impl Into<String>) -> Self {
        self.insert(property, value);
        self
    }

    /// Set `property` to `value`.
    pub fn insert(&mut self, property: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(slot) =
            self.declarations.iter_mut().find(|(p, _)| p == property)
        {
            slot.1 = value;
        } else {
            self.declarations.push((property.to_owned(), value));
        }
    }

    /// Value of `property`, if set.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    /// Number of declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Whether no declarations are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// `a: b; c: d` with double quotes escaped for use inside a
    /// double-quoted HTML attribute.
    #[must_use]
    pub fn to_inline(&self) -> String {
        let mut out = String::new();
        for (i, (property, value)) in self.declarations.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            let _ = write!(out, "{property}: {value};");
        }
        out.replace('"', "&quot;")
    }
}

/// `rgb(r, g, b)` from an sRGB triple in `[0, 1]`.
#[must_use]
pub fn css_rgb(color: [f32; 3]) -> String {
    let [r, g, b] = color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
    format!("rgb({r}, {g}, {b})")
}

/// Escape text for HTML element content and attribute values.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declarations_keep_insertion_order() {
        let style = Style::new()
            .set("display", "flex")
            .set("color", "red")
            .set("display", "block");
        assert_eq!(style.len(), 2);
        assert_eq!(style.to_inline(), "display: block; color: red;");
        assert_eq!(style.get("color"), Some("red"));
        assert_eq!(style.get("margin"), None);
    }

    #[test]
    fn inline_escapes_quotes() {
        let style = Style::new().set("font-family", "\"Inter\", sans-serif");
        assert_eq!(
            style.to_inline(),
            "font-family: &quot;Inter&quot;, sans-serif;"
        );
    }

    #[test]
    fn colors_render_as_css_rgb() {
        assert_eq!(css_rgb([1.0, 0.0, 0.5]), "rgb(255, 0, 128)");
        assert_eq!(css_rgb([2.0, -1.0, 0.0]), "rgb(255, 0, 0)");
    }

    #[test]
    fn html_special_characters_are_escaped() {
        assert_eq!(
            escape_html("<b>A & B's \"C\"</b>"),
            "&lt;b&gt;A &amp; B&#39;s &quot;C&quot;&lt;/b&gt;"
        );
    }
}
