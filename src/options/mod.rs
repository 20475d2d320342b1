//! Preview options with TOML preset support.
//!
//! Starting sheet, layout tuning, scene placement and animation timing
//! are consolidated here. Options serialize to/from TOML so presets can
//! be stored alongside a job.

mod animation;
mod layout;
mod scene;
mod sheet;

use std::path::Path;

pub use animation::AnimationOptions;
pub use layout::LayoutOptions;
pub use scene::SceneOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use sheet::SheetOptions;

use crate::error::FoldError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[animation]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Starting sheet and fold selection.
    pub sheet: SheetOptions,
    /// Panel partition tuning.
    pub layout: LayoutOptions,
    /// Transform tree placement.
    pub scene: SceneOptions,
    /// Fold animation parameters.
    pub animation: AnimationOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, FoldError> {
        let content = std::fs::read_to_string(path).map_err(FoldError::Io)?;
        toml::from_str(&content)
            .map_err(|e| FoldError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), FoldError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| FoldError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(FoldError::Io)?;
        }
        std::fs::write(path, content).map_err(FoldError::Io)
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::EasingFunction;
    use crate::layout::{FoldType, Orientation};

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[sheet]
fold_type = "gate-fold"
orientation = "horizontal"

[animation]
max_fold = 0.9
easing = "linear"
"#;
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.sheet.fold_type, FoldType::GateFold);
        assert_eq!(opts.sheet.orientation, Orientation::Horizontal);
        assert_eq!(opts.animation.max_fold, 0.9);
        assert_eq!(opts.animation.easing, EasingFunction::Linear);
        // Everything else should be default
        assert_eq!(opts.sheet.width, 8.5);
        assert_eq!(opts.layout.roll_inset, 0.05);
        assert!(opts.scene.lie_flat);
    }

    #[test]
    fn unknown_fold_type_in_preset_is_a_parse_error() {
        let toml_str = r#"
[sheet]
fold_type = "french-fold"
"#;
        assert!(toml::from_str::<Options>(toml_str).is_err());
    }

    #[test]
    fn save_and_load_preset() {
        let dir = std::env::temp_dir()
            .join(format!("foldview-presets-{}", std::process::id()));
        let mut opts = Options::default();
        opts.sheet.fold_type = FoldType::TriFoldZ;
        opts.animation.speed = 2.5;

        let path = dir.join("accordion.toml");
        opts.save(&path).unwrap();
        let loaded = Options::load(&path).unwrap();
        assert_eq!(loaded, opts);
        assert_eq!(Options::list_presets(&dir), vec!["accordion".to_owned()]);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("sheet"));
        assert!(props.contains_key("layout"));
        assert!(props.contains_key("scene"));
        assert!(props.contains_key("animation"));

        // Internal tuning stays out of the UI schema
        let animation = &props["animation"]["properties"];
        assert!(animation.get("max_fold").is_some());
        assert!(animation.get("speed").is_some());
        assert!(animation.get("separation").is_none());
        assert!(animation.get("seconds_per_fold").is_none());
    }
}
