//! Topology-specific hinge motion.
//!
//! A UI-facing progress `p` in `[0, 1]` becomes, per hinge:
//!
//! 1. a local progress (staged for roll folds, `p` otherwise),
//! 2. capped by `max_fold` and eased,
//! 3. an angle `eased * π`, signed by the panel's fold direction,
//! 4. a small lift along the fold-side normal that keeps surfaces from
//!    interpenetrating mid-fold.
//!
//! Poses are always recomputed from the rest pose, so applying the same
//! progress twice gives the same tree.

use std::f32::consts::PI;

use glam::Quat;

use super::easing::EasingFunction;
use crate::layout::FoldType;
use crate::options::AnimationOptions;
use crate::scene::{FoldTree, HingeInfo};

/// Share of the roll-fold sweep each hinge spends moving.
pub const ROLL_STAGE_SPAN: f32 = 0.8;
/// Progress the outer roll-fold hinge waits before it starts.
pub const ROLL_STAGE_DELAY: f32 = 0.2;

/// Angle and lift for one hinge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HingePose {
    /// Signed rotation about the hinge axis, radians.
    pub angle: f32,
    /// Translation along the fold-side normal, inches.
    pub lift: f32,
}

impl HingePose {
    /// Flat, unmoved hinge.
    pub const REST: HingePose = HingePose {
        angle: 0.0,
        lift: 0.0,
    };
}

/// Motion shaping shared by all topologies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoldMotion {
    /// Cap applied to local progress before easing.
    pub max_fold: f32,
    /// Curve applied after capping.
    pub easing: EasingFunction,
    /// Bi/Z lift at full progress.
    pub separation: f32,
    /// Gate-fold peak lift.
    pub gate_bump: f32,
}

impl Default for FoldMotion {
    fn default() -> Self {
        Self::from(&AnimationOptions::default())
    }
}

/// Non-finite shaping values fall back to the defaults.
impl From<&AnimationOptions> for FoldMotion {
    fn from(options: &AnimationOptions) -> Self {
        let defaults = AnimationOptions::default();
        Self {
            max_fold: finite_or("max_fold", options.max_fold, defaults.max_fold)
                .clamp(0.0, 1.0),
            easing: options.easing,
            separation: finite_or(
                "separation",
                options.separation,
                defaults.separation,
            ),
            gate_bump: finite_or(
                "gate_bump",
                options.gate_bump,
                defaults.gate_bump,
            ),
        }
    }
}

fn finite_or(name: &str, value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        log::warn!("ignoring non-finite {name} {value}");
        fallback
    }
}

impl FoldMotion {
    /// Unsigned hinge angle for a local progress.
    #[must_use]
    pub fn angle(&self, local: f32) -> f32 {
        self.easing.evaluate(local.clamp(0.0, 1.0) * self.max_fold) * PI
    }

    /// Local progress of one hinge. Roll folds stage their hinges so the
    /// innermost panel tucks in before the outer one closes over it.
    #[must_use]
    pub fn local_progress(
        fold_type: FoldType,
        hinge: &HingeInfo,
        progress: f32,
    ) -> f32 {
        let p = progress.clamp(0.0, 1.0);
        match fold_type {
            FoldType::TriFoldRoll if hinge.innermost => {
                (p / ROLL_STAGE_SPAN).min(1.0)
            }
            FoldType::TriFoldRoll => {
                ((p - ROLL_STAGE_DELAY) / ROLL_STAGE_SPAN).clamp(0.0, 1.0)
            }
            FoldType::BiFold | FoldType::TriFoldZ | FoldType::GateFold => p,
        }
    }

    /// Pose of one hinge at `progress`.
    #[must_use]
    pub fn pose(
        &self,
        fold_type: FoldType,
        hinge: &HingeInfo,
        progress: f32,
    ) -> HingePose {
        if hinge.is_base {
            return HingePose::REST;
        }
        let p = progress.clamp(0.0, 1.0);
        let local = Self::local_progress(fold_type, hinge, p);
        let angle = hinge.fold_direction.sign() * self.angle(local);
        let lift = match fold_type {
            FoldType::BiFold | FoldType::TriFoldZ => self.separation * p,
            FoldType::GateFold => self.gate_bump * (p * PI).sin(),
            FoldType::TriFoldRoll => hinge.nest_offset * local,
        };
        HingePose { angle, lift }
    }

    /// Pose every hinge of `tree` in place. Base pivots are restored to
    /// their lie-flat orientation; nothing is added, removed or reparented.
    pub fn apply(&self, tree: &mut FoldTree, progress: f32) {
        let fold_type = tree.fold_type();
        for (hinge, pivot) in tree.hinges_mut() {
            let pose = self.pose(fold_type, &hinge, progress);
            if hinge.is_base {
                pivot.reset();
                continue;
            }
            pivot.rotation = Quat::from_axis_angle(hinge.axis, pose.angle);
            pivot.translation =
                pivot.rest_translation() + hinge.fold_normal * pose.lift;
        }
    }

    /// A posed copy of `tree`, leaving the original untouched.
    #[must_use]
    pub fn posed(&self, tree: &FoldTree, progress: f32) -> FoldTree {
        let mut out = tree.clone();
        self.apply(&mut out, progress);
        out
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::layout::{calculate, Orientation, PaperSize};
    use crate::options::SceneOptions;
    use crate::scene::{build, MirrorOptions};

    const EPS: f32 = 1e-4;

    fn tree(
        fold_type: FoldType,
        orientation: Orientation,
        size: PaperSize,
    ) -> FoldTree {
        let config = calculate(fold_type, orientation, size).unwrap();
        build(
            &config,
            None,
            None,
            MirrorOptions::default(),
            &SceneOptions::default(),
        )
        .unwrap()
    }

    fn full_angle() -> f32 {
        EasingFunction::CubicInOut.evaluate(0.8) * PI
    }

    fn hinge_angle(tree: &FoldTree, motion: &FoldMotion, node: usize, p: f32) -> f32 {
        let hinge = tree.hinges().nth(node).unwrap();
        motion.pose(tree.fold_type(), &hinge, p).angle
    }

    #[test]
    fn progress_zero_is_identity_everywhere() {
        let motion = FoldMotion::default();
        for fold_type in FoldType::ALL {
            for orientation in [Orientation::Vertical, Orientation::Horizontal]
            {
                let mut t = tree(fold_type, orientation, PaperSize::LETTER);
                let flat = t.clone();
                motion.apply(&mut t, 0.6);
                motion.apply(&mut t, 0.0);
                for (node, rest) in t.nodes().iter().zip(flat.nodes()) {
                    let (a, b) = (node.pivot(), rest.pivot());
                    assert!(a.rotation.abs_diff_eq(b.rotation, 1e-6));
                    assert!(a.translation.abs_diff_eq(b.translation, 1e-6));
                    if node.parent().is_some() {
                        assert!(a.rotation.abs_diff_eq(Quat::IDENTITY, 1e-6));
                    }
                }
            }
        }
    }

    #[test]
    fn progress_one_reaches_capped_eased_angle() {
        let motion = FoldMotion::default();
        for fold_type in FoldType::ALL {
            let t = tree(fold_type, Orientation::Vertical, PaperSize::LETTER);
            for hinge in t.hinges() {
                let pose = motion.pose(fold_type, &hinge, 1.0);
                let expected = hinge.fold_direction.sign() * full_angle();
                assert!(
                    (pose.angle - expected).abs() < EPS,
                    "{fold_type} panel {}: {} vs {expected}",
                    hinge.panel,
                    pose.angle
                );
            }
        }
    }

    #[test]
    fn letter_bi_fold_hinge_angle() {
        let t = tree(FoldType::BiFold, Orientation::Vertical, PaperSize::LETTER);
        let angle = hinge_angle(&t, &FoldMotion::default(), 1, 1.0);
        // 1 - 0.4³ / 2 = 0.968
        assert!((angle.abs() - 0.968 * PI).abs() < EPS);
        assert!((angle.abs() - 3.0411).abs() < 1e-3);
    }

    #[test]
    fn applying_twice_does_not_drift() {
        let motion = FoldMotion::default();
        for fold_type in FoldType::ALL {
            let mut t = tree(fold_type, Orientation::Vertical, PaperSize::TABLOID);
            motion.apply(&mut t, 1.0);
            let once = t.clone();
            motion.apply(&mut t, 1.0);
            assert_eq!(t, once);
        }
    }

    #[test]
    fn roll_fold_stages_inner_before_outer() {
        let motion = FoldMotion::default();
        let t = tree(
            FoldType::TriFoldRoll,
            Orientation::Vertical,
            PaperSize::new(12.0, 9.0),
        );
        let inner = t.hinges().find(|h| h.panel == 2).unwrap();
        let outer = t.hinges().find(|h| h.panel == 1).unwrap();
        assert!(inner.innermost);
        assert!(!outer.innermost);

        // Outer waits for the first fifth
        assert_eq!(FoldMotion::local_progress(t.fold_type(), &outer, 0.2), 0.0);
        assert!(motion.pose(t.fold_type(), &outer, 0.1).angle.abs() < 1e-6);
        assert!(motion.pose(t.fold_type(), &inner, 0.1).angle.abs() > 0.0);

        // Inner completes at 0.8 while outer is still moving
        assert_eq!(FoldMotion::local_progress(t.fold_type(), &inner, 0.8), 1.0);
        let outer_local = FoldMotion::local_progress(t.fold_type(), &outer, 0.8);
        assert!((outer_local - 0.75).abs() < 1e-6);
        let inner_angle = motion.pose(t.fold_type(), &inner, 0.8).angle.abs();
        let outer_angle = motion.pose(t.fold_type(), &outer, 0.8).angle.abs();
        assert!((inner_angle - full_angle()).abs() < EPS);
        assert!(outer_angle < inner_angle);
    }

    #[test]
    fn roll_fold_nest_offset_grows_with_inner_progress() {
        let motion = FoldMotion::default();
        let t = tree(
            FoldType::TriFoldRoll,
            Orientation::Vertical,
            PaperSize::new(12.0, 9.0),
        );
        let inner = t.hinges().find(|h| h.panel == 2).unwrap();
        let outer = t.hinges().find(|h| h.panel == 1).unwrap();
        assert_eq!(motion.pose(t.fold_type(), &inner, 0.0).lift, 0.0);
        assert!((motion.pose(t.fold_type(), &inner, 1.0).lift - 0.02).abs() < 1e-6);
        assert_eq!(motion.pose(t.fold_type(), &outer, 1.0).lift, 0.0);
    }

    #[test]
    fn gate_fold_bump_peaks_mid_fold() {
        let motion = FoldMotion::default();
        let t = tree(FoldType::GateFold, Orientation::Vertical, PaperSize::TABLOID);
        let flap = t.hinges().find(|h| !h.is_base).unwrap();
        let mid = motion.pose(t.fold_type(), &flap, 0.5).lift;
        assert!((mid - motion.gate_bump).abs() < 1e-6);
        assert!(motion.pose(t.fold_type(), &flap, 1.0).lift.abs() < 1e-6);
        assert_eq!(motion.pose(t.fold_type(), &flap, 0.0).lift, 0.0);
    }

    #[test]
    fn bi_fold_lift_is_proportional() {
        let motion = FoldMotion::default();
        let t = tree(FoldType::BiFold, Orientation::Vertical, PaperSize::LETTER);
        let hinge = t.hinges().nth(1).unwrap();
        let half = motion.pose(t.fold_type(), &hinge, 0.5).lift;
        let full = motion.pose(t.fold_type(), &hinge, 1.0).lift;
        assert!((full - 2.0 * half).abs() < 1e-6);
        assert!((full - motion.separation).abs() < 1e-6);
    }

    #[test]
    fn gate_flaps_swing_up_off_the_base() {
        let motion = FoldMotion::default();
        let mut t = tree(FoldType::GateFold, Orientation::Vertical, PaperSize::TABLOID);
        motion.apply(&mut t, 0.5);
        let corners = t.world_corners();
        // Base is lying flat at y = 0; both flaps swing up over it
        for (node, c) in t.nodes().iter().zip(&corners) {
            if node.parent().is_some() {
                assert!(c.iter().all(|p| p.y > -EPS));
                assert!(c.iter().any(|p| p.y > 1.0));
            }
        }
    }

    #[test]
    fn horizontal_folds_lift_same_face_as_vertical() {
        let motion = FoldMotion::default();
        for orientation in [Orientation::Vertical, Orientation::Horizontal] {
            let mut t = tree(FoldType::BiFold, orientation, PaperSize::LETTER);
            motion.apply(&mut t, 0.5);
            let flap = t.world_corners()[1];
            let mean = flap.iter().copied().sum::<Vec3>() / 4.0;
            assert!(mean.y > 0.5, "{orientation:?} flap mean {mean:?}");
        }
    }

    #[test]
    fn posed_leaves_source_flat() {
        let motion = FoldMotion::default();
        let t = tree(FoldType::TriFoldZ, Orientation::Vertical, PaperSize::LETTER);
        let folded = motion.posed(&t, 1.0);
        assert_ne!(folded, t);
        assert_eq!(t.nodes()[1].pivot().rotation, Quat::IDENTITY);
    }

    #[test]
    fn non_finite_options_use_default_shaping() {
        let options = AnimationOptions {
            max_fold: f32::NAN,
            separation: f32::INFINITY,
            gate_bump: f32::NEG_INFINITY,
            ..AnimationOptions::default()
        };
        let motion = FoldMotion::from(&options);
        assert_eq!(motion, FoldMotion::default());
        assert!(motion.angle(0.5).is_finite());
    }
}
