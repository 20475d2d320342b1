use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::layout::{FoldType, Orientation, PaperSize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Sheet", inline)]
#[serde(default)]
/// Sheet the preview starts from.
pub struct SheetOptions {
    /// Sheet width in inches.
    #[schemars(title = "Width (in)", range(min = 1.0, max = 48.0), extend("step" = 0.125))]
    pub width: f32,
    /// Sheet height in inches.
    #[schemars(title = "Height (in)", range(min = 1.0, max = 48.0), extend("step" = 0.125))]
    pub height: f32,
    /// Fold topology.
    #[schemars(title = "Fold")]
    pub fold_type: FoldType,
    /// Fold-axis orientation.
    #[schemars(title = "Orientation")]
    pub orientation: Orientation,
}

impl SheetOptions {
    /// Paper size described by these options.
    #[must_use]
    pub fn size(&self) -> PaperSize {
        PaperSize::new(self.width, self.height)
    }
}

impl Default for SheetOptions {
    fn default() -> Self {
        Self {
            width: PaperSize::LETTER.width,
            height: PaperSize::LETTER.height,
            fold_type: FoldType::BiFold,
            orientation: Orientation::Vertical,
        }
    }
}
