use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::animation::EasingFunction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Animation", inline)]
#[serde(default)]
/// Fold animation timing and motion shaping.
pub struct AnimationOptions {
    /// Fraction of a full 180 degree fold reached at progress 1. Keeps
    /// closed panels from intersecting.
    #[schemars(title = "Max Fold", range(min = 0.1, max = 1.0), extend("step" = 0.05))]
    pub max_fold: f32,
    /// Playback speed multiplier.
    #[schemars(title = "Speed", range(min = 0.1, max = 4.0), extend("step" = 0.1))]
    pub speed: f32,
    /// Seconds for a full flat-to-folded sweep at speed 1.
    #[schemars(skip)]
    pub seconds_per_fold: f32,
    /// Bi/Z folds: perpendicular lift (inches) at progress 1.
    #[schemars(skip)]
    pub separation: f32,
    /// Gate fold: peak perpendicular lift (inches) mid-fold.
    #[schemars(skip)]
    pub gate_bump: f32,
    /// Easing curve applied to the capped progress.
    #[schemars(title = "Easing")]
    pub easing: EasingFunction,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            max_fold: 0.8,
            speed: 1.0,
            seconds_per_fold: 2.0,
            separation: 0.01,
            gate_bump: 0.05,
            easing: EasingFunction::CubicInOut,
        }
    }
}
