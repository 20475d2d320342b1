use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Scene", inline)]
#[serde(default)]
/// Transform tree placement.
pub struct SceneOptions {
    /// Tip the base panel so the sheet lies on the ground plane, front
    /// face up. When false the sheet stands in the XY plane facing +Z.
    #[schemars(title = "Lie Flat")]
    pub lie_flat: bool,
    /// Recenter the assembly on the ground plane after every build.
    #[schemars(title = "Center")]
    pub center: bool,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            lie_flat: true,
            center: true,
        }
    }
}
