use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Layout", inline)]
#[serde(default)]
/// Panel partition tuning.
pub struct LayoutOptions {
    /// Roll fold: the outer panel grows and the inner panel shrinks by this
    /// much (inches) so the inner panel tucks in without touching the crease.
    #[schemars(title = "Roll Inset", range(min = 0.0, max = 0.5), extend("step" = 0.01))]
    pub roll_inset: f32,
    /// Roll fold: perpendicular clearance of the innermost panel (inches).
    #[schemars(title = "Nest Offset", range(min = 0.0, max = 0.1), extend("step" = 0.005))]
    pub roll_nest_offset: f32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            roll_inset: 0.05,
            roll_nest_offset: 0.02,
        }
    }
}
