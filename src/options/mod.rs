//! Centralized rendering/display options with TOML preset support.
//!
//! All tweakable settings (helix shape, palette, motion, lighting, camera,
//! display, page shell, debug toggles) are consolidated here. Options
//! serialize to/from TOML so a preset file can override any subset.

mod camera;
mod colors;
mod debug;
mod display;
mod helix;
mod lighting;
mod motion;
mod shell;

use std::path::Path;

pub use camera::CameraOptions;
pub use colors::ColorOptions;
pub use debug::DebugOptions;
pub use display::DisplayOptions;
pub use helix::{HelixOptions, SplineKind};
pub use lighting::LightingOptions;
pub use motion::MotionOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use shell::ShellOptions;

use crate::error::DuplexError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[motion]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Helix shape parameters.
    pub helix: HelixOptions,
    /// Strand and rung palette.
    pub colors: ColorOptions,
    /// Spin and bob of the helix group.
    pub motion: MotionOptions,
    /// Lighting parameters.
    pub lighting: LightingOptions,
    /// Camera projection and orbit parameters.
    pub camera: CameraOptions,
    /// Surface and presentation settings.
    pub display: DisplayOptions,
    /// Overlay text and placeholder look.
    #[schemars(skip)]
    pub shell: ShellOptions,
    /// Debug visualization options.
    pub debug: DebugOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, DuplexError> {
        let content = std::fs::read_to_string(path).map_err(DuplexError::Io)?;
        Self::from_toml(&content)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, DuplexError> {
        toml::from_str(content)
            .map_err(|e| DuplexError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), DuplexError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| DuplexError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(DuplexError::Io)?;
        }
        std::fs::write(path, content).map_err(DuplexError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }

    /// Whether switching from `self` to `other` requires rebuilding the
    /// helix geometry (shape change) rather than just new uniforms.
    #[must_use]
    pub fn needs_rebuild(&self, other: &Self) -> bool {
        self.helix != other.helix || self.colors != other.colors
    }

    /// Work needed to move from `self` to `other`.
    #[must_use]
    pub fn change_to(&self, other: &Self) -> OptionsChange {
        OptionsChange {
            rebuild: self.needs_rebuild(other),
            resample: self.display.sample_count()
                != other.display.sample_count(),
        }
    }
}

/// What an options swap requires of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OptionsChange {
    /// Shape or palette differ: queue one background rebuild.
    pub rebuild: bool,
    /// MSAA sample count differs: swap pipelines and attachments. The
    /// uploaded geometry is reused.
    pub resample: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[motion]
spin_rate = 0.3
";
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.motion.spin_rate, 0.3);
        // Everything else should be default
        assert_eq!(opts.motion.bob_amplitude, 0.15);
        assert_eq!(opts.helix.base_pairs, 20);
        assert_eq!(opts.helix.spline, SplineKind::Centripetal);
    }

    #[test]
    fn spline_kind_uses_snake_case() {
        let opts = Options::from_toml("[helix]\nspline = \"uniform\"\n").unwrap();
        assert_eq!(opts.helix.spline, SplineKind::Uniform);
        assert!(Options::from_toml("[helix]\nspline = \"Bogus\"\n").is_err());
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        let err = Options::from_toml("[helix\nbase_pairs = 3").unwrap_err();
        assert!(matches!(err, DuplexError::OptionsParse(_)));
    }

    #[test]
    fn save_then_load_and_list_presets() {
        let dir = std::env::temp_dir()
            .join(format!("duplex-presets-{}", std::process::id()));
        let mut opts = Options::default();
        opts.shell.heading = "Custom".to_owned();
        opts.save(&dir.join("hero.toml")).unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let loaded = Options::load(&dir.join("hero.toml")).unwrap();
        assert_eq!(loaded, opts);
        assert_eq!(Options::list_presets(&dir), vec!["hero".to_owned()]);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn rebuild_only_for_shape_or_palette_changes() {
        let base = Options::default();
        let mut other = base.clone();
        other.motion.spin_rate = 1.0;
        other.camera.fovy = 60.0;
        assert!(!base.needs_rebuild(&other));

        other.helix.radius = 2.0;
        assert!(base.needs_rebuild(&other));
    }

    #[test]
    fn sample_count_change_does_not_imply_rebuild() {
        let base = Options::default();
        let mut other = base.clone();
        other.display.msaa_samples = 1;
        assert_eq!(
            base.change_to(&other),
            OptionsChange {
                rebuild: false,
                resample: true,
            }
        );

        other.colors.rung = [1.0, 0.0, 0.0];
        let change = base.change_to(&other);
        assert!(change.rebuild && change.resample);

        assert_eq!(base.change_to(&base.clone()), OptionsChange::default());
    }

    #[test]
    fn helix_digest_tracks_shape_fields() {
        let a = HelixOptions::default();
        let mut b = a.clone();
        assert_eq!(a.digest(), b.digest());
        b.twist_per_step += 0.01;
        assert_ne!(a.digest(), b.digest());
        assert!((a.height() - 8.0).abs() < 1e-6);
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        // UI-exposed sections should be present
        assert!(props.contains_key("helix"));
        assert!(props.contains_key("motion"));
        assert!(props.contains_key("lighting"));
        assert!(props.contains_key("camera"));
        assert!(props.contains_key("debug"));

        // Skipped sections should be absent
        assert!(!props.contains_key("shell"));

        // Lighting should have exposed fields but not skipped ones
        let lighting = &props["lighting"]["properties"];
        assert!(lighting.get("light1_intensity").is_some());
        assert!(lighting.get("ambient_intensity").is_some());
        assert!(lighting.get("light1_position").is_none());
        assert!(lighting.get("shininess").is_none());
    }
}
