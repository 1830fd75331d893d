use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::geometry::Strand;

/// Three-color palette of the helix.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Colors", inline)]
#[serde(default)]
pub struct ColorOptions {
    /// RGB color of strand A and its junction nodes.
    #[schemars(title = "Backbone A")]
    pub backbone_a: [f32; 3],
    /// RGB color of strand B and its junction nodes.
    #[schemars(title = "Backbone B")]
    pub backbone_b: [f32; 3],
    /// RGB color of the rungs.
    #[schemars(title = "Rungs")]
    pub rung: [f32; 3],
    /// Rung opacity (rungs are drawn after the opaque geometry).
    #[schemars(title = "Rung Opacity", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub rung_opacity: f32,
}

impl Default for ColorOptions {
    fn default() -> Self {
        Self {
            backbone_a: [0.0, 0.83, 1.0],
            backbone_b: [0.48, 0.38, 1.0],
            rung: [0.85, 0.9, 1.0],
            rung_opacity: 0.75,
        }
    }
}

impl ColorOptions {
    /// Backbone color shared by a strand's tube and its junction nodes.
    #[must_use]
    pub fn backbone(&self, strand: Strand) -> [f32; 3] {
        match strand {
            Strand::A => self.backbone_a,
            Strand::B => self.backbone_b,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_strand_gets_its_own_backbone_color() {
        let colors = ColorOptions::default();
        assert_eq!(colors.backbone(Strand::A), [0.0, 0.83, 1.0]);
        assert_eq!(colors.backbone(Strand::B), [0.48, 0.38, 1.0]);
    }
}
