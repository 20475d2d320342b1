//! [`FoldEngine`]: the single owner of live preview state.
//!
//! The engine holds the latest [`FoldState`], the [`PanelConfig`] and
//! [`FoldTree`] built from it, and the [`FoldAnimator`] that poses the tree.
//! Every mutation goes through `&mut self`, so a rebuild can never interleave
//! with a frame's animation step: the caller finishes one before starting
//! the other.
//!
//! Rebuilds are transactional. A new layout and tree are produced off to
//! the side, posed at the current progress, and only then swapped in; the
//! old tree (and every mesh and material binding it owns) is dropped in the
//! same step. On error nothing changes.

mod options;
mod playback;
mod scene_management;

use crate::animation::{FoldAnimator, FoldMotion};
use crate::error::FoldError;
use crate::layout::PanelConfig;
use crate::options::Options;
use crate::scene::{FoldState, FoldTree};
use crate::util::frame_timing::FrameTiming;

/// Fold preview engine.
#[derive(Debug)]
pub struct FoldEngine {
    options: Options,
    state: FoldState,
    config: PanelConfig,
    tree: FoldTree,
    animator: FoldAnimator,
    timing: FrameTiming,
    /// Monotonically increasing generation; bumped on any change a
    /// renderer has to pick up.
    generation: u64,
    /// Generation that was last consumed by the renderer.
    rendered_generation: u64,
}

impl FoldEngine {
    /// Engine starting from the sheet described by `options.sheet`.
    pub fn new(options: Options) -> Result<Self, FoldError> {
        let sheet = &options.sheet;
        let state =
            FoldState::new(sheet.size(), sheet.fold_type, sheet.orientation);
        Self::with_state(options, state)
    }

    /// Engine starting from an explicit state.
    pub fn with_state(
        options: Options,
        state: FoldState,
    ) -> Result<Self, FoldError> {
        let animator = FoldAnimator::new(&options.animation);
        let (config, tree) = prepare(&state, &options, animator.progress())?;
        log::info!(
            "fold engine ready: {} {:?} at {}x{} in",
            state.fold_type,
            state.orientation,
            state.size.width,
            state.size.height
        );
        Ok(Self {
            options,
            state,
            config,
            tree,
            animator,
            timing: FrameTiming::new(),
            generation: 1,
            rendered_generation: 0,
        })
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// State the current tree was built from.
    #[must_use]
    pub fn state(&self) -> &FoldState {
        &self.state
    }

    /// Current panel layout.
    #[must_use]
    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// Current transform tree, posed at [`Self::progress`].
    #[must_use]
    pub fn tree(&self) -> &FoldTree {
        &self.tree
    }

    /// Playback state.
    #[must_use]
    pub fn animator(&self) -> &FoldAnimator {
        &self.animator
    }

    /// Current fold progress in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.animator.progress()
    }

    /// Smoothed frame rate seen by [`Self::advance_frame`].
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.timing.fps()
    }

    /// Whether the tree changed since the last [`Self::mark_rendered`].
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.generation != self.rendered_generation
    }

    /// Mark current generation as rendered (call after updating renderers).
    pub fn mark_rendered(&mut self) {
        self.rendered_generation = self.generation;
    }

    /// Current generation counter.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn invalidate(&mut self) {
        self.generation += 1;
    }

    /// Rebuild for `state` under the current options and swap it in.
    fn rebuild(&mut self, state: FoldState) -> Result<(), FoldError> {
        let (config, tree) =
            prepare(&state, &self.options, self.animator.progress())?;
        self.commit(state, config, tree);
        Ok(())
    }

    fn commit(
        &mut self,
        state: FoldState,
        config: PanelConfig,
        tree: FoldTree,
    ) {
        log::debug!(
            "rebuilt {} {:?} tree ({} panels)",
            state.fold_type,
            state.orientation,
            tree.len()
        );
        self.state = state;
        self.config = config;
        self.tree = tree;
        self.invalidate();
    }
}

/// Layout and tree for `state`, posed at `progress`.
fn prepare(
    state: &FoldState,
    options: &Options,
    progress: f32,
) -> Result<(PanelConfig, FoldTree), FoldError> {
    let config = state.layout(&options.layout)?;
    let mut tree = state.build(&config, &options.scene)?;
    FoldMotion::from(&options.animation).apply(&mut tree, progress);
    Ok((config, tree))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use glam::Quat;

    use super::*;
    use crate::animation::{EasingFunction, PlaybackMode};
    use crate::layout::{FoldType, Orientation, PaperSize};
    use crate::scene::{Mirror, MirrorOptions, TextureHandle};

    fn engine() -> FoldEngine {
        FoldEngine::new(Options::default()).unwrap()
    }

    #[test]
    fn starts_flat_from_sheet_options() {
        let engine = engine();
        assert_eq!(engine.state().fold_type, FoldType::BiFold);
        assert_eq!(engine.state().size, PaperSize::LETTER);
        assert_eq!(engine.tree().len(), 2);
        assert_eq!(engine.progress(), 0.0);
        assert!(engine.is_dirty());
    }

    #[test]
    fn invalid_sheet_options_fail_construction() {
        let mut options = Options::default();
        options.sheet.width = 0.0;
        assert!(matches!(
            FoldEngine::new(options),
            Err(FoldError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn failed_rebuild_leaves_previous_state() {
        let mut engine = engine();
        engine.set_fold_type(FoldType::TriFoldZ).unwrap();
        engine.mark_rendered();
        let state = engine.state().clone();
        let config = engine.config().clone();
        let tree = engine.tree().clone();

        let err = engine.set_size(PaperSize::new(-1.0, 2.0)).unwrap_err();
        assert!(matches!(err, FoldError::InvalidDimension { .. }));
        assert_eq!(engine.state(), &state);
        assert_eq!(engine.config(), &config);
        assert_eq!(engine.tree(), &tree);
        assert!(!engine.is_dirty());
    }

    #[test]
    fn unknown_fold_id_falls_back_observably() {
        let mut engine = engine();
        engine.set_fold_type(FoldType::GateFold).unwrap();
        let warning = engine.select_fold_type("french-fold").unwrap();
        assert!(matches!(warning, Some(FoldError::UnknownFoldType(_))));
        assert_eq!(engine.state().fold_type, FoldType::BiFold);

        let warning = engine.select_fold_type("tri-fold-roll").unwrap();
        assert!(warning.is_none());
        assert_eq!(engine.tree().len(), 3);
    }

    #[test]
    fn rebuild_keeps_progress() {
        let mut engine = engine();
        engine.set_progress(0.5).unwrap();
        engine.set_orientation(Orientation::Horizontal).unwrap();
        assert_eq!(engine.progress(), 0.5);
        assert_eq!(engine.config().fold_length(), 11.0);
        let hinge = engine.tree().node_for_panel(1).unwrap();
        assert!(!hinge.pivot().rotation.abs_diff_eq(Quat::IDENTITY, 1e-3));
    }

    #[test]
    fn tick_poses_tree_and_marks_dirty() {
        let mut engine = engine();
        engine.mark_rendered();
        assert!(!engine.tick(Duration::from_secs(1)));
        assert!(!engine.is_dirty());

        engine.play();
        assert!(engine.tick(Duration::from_secs(1)));
        assert!((engine.progress() - 0.5).abs() < 1e-5);
        assert!(engine.is_dirty());
        let expected = engine.animator().motion().posed(engine.tree(), 0.5);
        assert_eq!(engine.tree(), &expected);
    }

    #[test]
    fn animate_to_and_pause() {
        let mut engine = engine();
        engine.animate_to(1.0).unwrap();
        assert_eq!(engine.animator().mode(), PlaybackMode::AnimateTo(1.0));
        let _ = engine.tick(Duration::from_millis(500));
        engine.toggle_playback();
        assert_eq!(engine.animator().mode(), PlaybackMode::Idle);
        let p = engine.progress();
        assert!(!engine.tick(Duration::from_secs(1)));
        assert_eq!(engine.progress(), p);
        assert!(engine.animate_to(f32::NAN).is_err());
    }

    #[test]
    fn snapshot_leaves_live_tree_alone() {
        let mut engine = engine();
        engine.set_fold_type(FoldType::GateFold).unwrap();
        let live = engine.tree().clone();
        let folded = engine.snapshot(1.0).unwrap();
        assert_ne!(folded, live);
        assert_eq!(engine.tree(), &live);
        assert_eq!(engine.progress(), 0.0);
        assert!(matches!(
            engine.snapshot(f32::INFINITY),
            Err(FoldError::InvalidProgress(_))
        ));
    }

    #[test]
    fn reset_returns_to_flat() {
        let mut engine = engine();
        let flat = engine.tree().clone();
        engine.set_progress(0.8).unwrap();
        engine.play();
        engine.reset();
        assert_eq!(engine.progress(), 0.0);
        assert!(!engine.animator().is_animating());
        assert_eq!(engine.tree(), &flat);
    }

    #[test]
    fn textures_and_mirror_rebuild_materials() {
        let mut engine = engine();
        let art = TextureHandle::new("art.png");
        engine.set_textures(Some(art.clone()), Some(art)).unwrap();
        assert!(engine.tree().front_material().is_some());
        let mirror = MirrorOptions {
            back: Mirror {
                horizontal: true,
                vertical: false,
            },
            ..MirrorOptions::default()
        };
        engine.set_mirror(mirror).unwrap();
        assert_eq!(engine.state().mirror, mirror);
        let back = engine.tree().back_material().unwrap();
        assert!(back.transform.repeat.x < 0.0);
    }

    #[test]
    fn set_options_reposes_with_new_motion() {
        let mut engine = engine();
        engine.set_progress(1.0).unwrap();
        let mut options = Options::default();
        options.animation.max_fold = 1.0;
        options.animation.easing = EasingFunction::Linear;
        engine.set_options(options.clone()).unwrap();
        assert_eq!(engine.options(), &options);
        assert_eq!(engine.animator().motion().max_fold, 1.0);

        let flat = engine
            .state()
            .build(engine.config(), &options.scene)
            .unwrap();
        let expected = FoldMotion::from(&options.animation).posed(&flat, 1.0);
        assert_eq!(engine.tree(), &expected);
    }

    #[test]
    fn nan_preset_poses_with_default_motion() {
        let options: Options =
            toml::from_str("[animation]\nmax_fold = nan\n").unwrap();
        assert!(options.animation.max_fold.is_nan());
        let mut engine = engine();
        engine.set_options(options).unwrap();
        engine.set_progress(0.5).unwrap();
        assert_eq!(engine.animator().motion(), &FoldMotion::default());

        let flap = engine.tree().node_for_panel(1).unwrap();
        assert!(flap.pivot().rotation.is_finite());
        let flat = engine
            .state()
            .build(engine.config(), &engine.options().scene)
            .unwrap();
        let expected = FoldMotion::default().posed(&flat, 0.5);
        assert_eq!(engine.tree(), &expected);
    }
}
