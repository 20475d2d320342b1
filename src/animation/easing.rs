//! Easing curves applied to capped fold progress.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Easing function variants for fold motion curves.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum EasingFunction {
    /// Linear interpolation (no easing).
    Linear,
    /// Quadratic ease-in (slow start, fast end).
    QuadraticIn,
    /// Quadratic ease-out (fast start, slow end).
    QuadraticOut,
    /// Cubic ease-in-out: `4t³` below one half, `1 - (2 - 2t)³ / 2` above.
    #[default]
    CubicInOut,
}

impl EasingFunction {
    /// Evaluate the easing function at time t.
    ///
    /// Input t is clamped to [0.0, 1.0].
    /// Returns the eased value, also in [0.0, 1.0].
    #[inline]
    #[must_use]
    pub fn evaluate(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            EasingFunction::Linear => t,
            EasingFunction::QuadraticIn => t * t,
            EasingFunction::QuadraticOut => {
                let omt = 1.0 - t;
                1.0 - omt * omt
            }
            EasingFunction::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u / 2.0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_endpoints() {
        let linear = EasingFunction::Linear;
        assert_eq!(linear.evaluate(0.0), 0.0);
        assert_eq!(linear.evaluate(0.5), 0.5);
        assert_eq!(linear.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_cubic_in_out_endpoints_and_midpoint() {
        let cubic = EasingFunction::CubicInOut;
        assert_eq!(cubic.evaluate(0.0), 0.0);
        assert_eq!(cubic.evaluate(0.5), 0.5);
        assert_eq!(cubic.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_cubic_in_out_branches() {
        let cubic = EasingFunction::CubicInOut;
        // 4 * 0.25³
        assert!((cubic.evaluate(0.25) - 0.0625).abs() < 1e-6);
        // 1 - 0.4³ / 2
        assert!((cubic.evaluate(0.8) - 0.968).abs() < 1e-6);
    }

    #[test]
    fn test_cubic_in_out_is_symmetric() {
        let cubic = EasingFunction::CubicInOut;
        for i in 0..=20 {
            let t = i as f32 / 20.0;
            let mirrored = 1.0 - cubic.evaluate(1.0 - t);
            assert!((cubic.evaluate(t) - mirrored).abs() < 1e-5);
        }
    }

    #[test]
    fn test_input_clamping() {
        let linear = EasingFunction::Linear;
        assert_eq!(linear.evaluate(-0.5), 0.0);
        assert_eq!(linear.evaluate(1.5), 1.0);

        let cubic = EasingFunction::CubicInOut;
        assert_eq!(cubic.evaluate(-0.5), 0.0);
        assert_eq!(cubic.evaluate(1.5), 1.0);
    }

    #[test]
    fn test_quadratic_in() {
        let quad_in = EasingFunction::QuadraticIn;
        assert_eq!(quad_in.evaluate(0.0), 0.0);
        assert_eq!(quad_in.evaluate(0.5), 0.25);
        assert_eq!(quad_in.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_quadratic_out() {
        let quad_out = EasingFunction::QuadraticOut;
        assert_eq!(quad_out.evaluate(0.0), 0.0);
        assert_eq!(quad_out.evaluate(0.5), 0.75);
        assert_eq!(quad_out.evaluate(1.0), 1.0);
    }

    #[test]
    fn test_default_is_cubic_in_out() {
        assert_eq!(EasingFunction::default(), EasingFunction::CubicInOut);
    }
}
