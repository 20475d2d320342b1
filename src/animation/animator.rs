//! Progress playback driven by frame deltas.

use std::time::Duration;

use super::motion::FoldMotion;
use crate::error::FoldError;
use crate::options::AnimationOptions;
use crate::scene::FoldTree;

/// Shortest allowed full sweep, seconds.
const MIN_SECONDS_PER_FOLD: f32 = 0.01;

/// What [`FoldAnimator::tick`] does with progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PlaybackMode {
    /// Progress stays where it is.
    #[default]
    Idle,
    /// Sweep back and forth between flat and folded.
    Play,
    /// Move toward a target progress, then go idle.
    AnimateTo(f32),
}

/// Owns the scalar fold progress and advances it once per frame.
///
/// The animator never touches tree structure: [`FoldAnimator::apply`] only
/// writes pivot rotation and translation through [`FoldMotion`].
#[derive(Debug, Clone, PartialEq)]
pub struct FoldAnimator {
    progress: f32,
    /// +1 while folding, -1 while unfolding.
    direction: f32,
    mode: PlaybackMode,
    speed: f32,
    seconds_per_fold: f32,
    motion: FoldMotion,
}

impl Default for FoldAnimator {
    fn default() -> Self {
        Self::new(&AnimationOptions::default())
    }
}

impl FoldAnimator {
    /// Flat, idle animator.
    #[must_use]
    pub fn new(options: &AnimationOptions) -> Self {
        let mut animator = Self {
            progress: 0.0,
            direction: 1.0,
            mode: PlaybackMode::Idle,
            speed: 1.0,
            seconds_per_fold: 2.0,
            motion: FoldMotion::from(options),
        };
        animator.set_options(options);
        animator
    }

    /// Pick up new timing and motion shaping; progress and mode are kept.
    pub fn set_options(&mut self, options: &AnimationOptions) {
        self.set_speed(options.speed);
        self.seconds_per_fold = if options.seconds_per_fold.is_finite() {
            options.seconds_per_fold.max(MIN_SECONDS_PER_FOLD)
        } else {
            log::warn!(
                "ignoring non-finite seconds_per_fold {}",
                options.seconds_per_fold
            );
            self.seconds_per_fold
        };
        self.motion = FoldMotion::from(options);
    }

    /// Current progress in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Current playback mode.
    #[must_use]
    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    /// Whether the next tick can change progress.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.mode != PlaybackMode::Idle
    }

    /// Playback speed multiplier.
    #[must_use]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Set the playback speed multiplier. Negative values stop motion;
    /// non-finite values are ignored.
    pub fn set_speed(&mut self, speed: f32) {
        if speed.is_finite() {
            self.speed = speed.max(0.0);
        } else {
            log::warn!("ignoring non-finite playback speed {speed}");
        }
    }

    /// Motion shaping used by [`Self::apply`].
    #[must_use]
    pub fn motion(&self) -> &FoldMotion {
        &self.motion
    }

    /// Start sweeping. At either end the sweep heads back the other way.
    pub fn play(&mut self) {
        if self.progress >= 1.0 {
            self.direction = -1.0;
        } else if self.progress <= 0.0 {
            self.direction = 1.0;
        }
        self.mode = PlaybackMode::Play;
    }

    /// Stop advancing progress.
    pub fn pause(&mut self) {
        self.mode = PlaybackMode::Idle;
    }

    /// Play when idle, pause otherwise.
    pub fn toggle(&mut self) {
        if self.is_animating() {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Move toward `target` (clamped to `[0, 1]`) over the following ticks.
    pub fn animate_to(&mut self, target: f32) -> Result<(), FoldError> {
        let target = finite_progress(target)?;
        self.mode = if target == self.progress {
            PlaybackMode::Idle
        } else {
            PlaybackMode::AnimateTo(target)
        };
        Ok(())
    }

    /// Jump to `progress` (clamped to `[0, 1]`) and go idle.
    pub fn set_progress(&mut self, progress: f32) -> Result<(), FoldError> {
        self.progress = finite_progress(progress)?;
        self.mode = PlaybackMode::Idle;
        Ok(())
    }

    /// Advance by one frame delta. Returns whether progress changed.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let step = dt.as_secs_f32() * self.speed / self.seconds_per_fold;
        if step <= 0.0 {
            return false;
        }
        let before = self.progress;
        match self.mode {
            PlaybackMode::Idle => {}
            PlaybackMode::Play => {
                self.progress += self.direction * step;
                if self.progress >= 1.0 {
                    self.progress = 1.0;
                    self.direction = -1.0;
                } else if self.progress <= 0.0 {
                    self.progress = 0.0;
                    self.direction = 1.0;
                }
            }
            PlaybackMode::AnimateTo(target) => {
                let remaining = target - self.progress;
                if remaining.abs() <= step {
                    self.progress = target;
                    self.mode = PlaybackMode::Idle;
                } else {
                    self.progress += remaining.signum() * step;
                }
            }
        }
        self.progress != before
    }

    /// Pose `tree` at the current progress.
    pub fn apply(&self, tree: &mut FoldTree) {
        self.motion.apply(tree, self.progress);
    }

    /// Back to flat and idle, restoring every pivot of `tree`.
    pub fn reset(&mut self, tree: &mut FoldTree) {
        self.progress = 0.0;
        self.direction = 1.0;
        self.mode = PlaybackMode::Idle;
        tree.reset_pivots();
    }
}

fn finite_progress(progress: f32) -> Result<f32, FoldError> {
    if progress.is_finite() {
        Ok(progress.clamp(0.0, 1.0))
    } else {
        Err(FoldError::InvalidProgress(progress))
    }
}
